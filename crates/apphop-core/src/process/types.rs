use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// OS process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processes running one executable. Iterates in ascending pid order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessIdSet(BTreeSet<ProcessId>);

impl ProcessIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pid: ProcessId) -> bool {
        self.0.insert(pid)
    }

    pub fn contains(&self, pid: ProcessId) -> bool {
        self.0.contains(&pid)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ProcessId> for ProcessIdSet {
    fn from_iter<I: IntoIterator<Item = ProcessId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<u32> for ProcessIdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().map(ProcessId::from).collect())
    }
}

impl fmt::Display for ProcessIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", pids.join(","))
    }
}
