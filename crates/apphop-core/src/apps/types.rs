use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::activation::TargetApp;

/// One application in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    /// Extra launch arguments. Empty means "launch through the shell".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl AppEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: name.into(),
            path: path.into(),
            args,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target(&self) -> TargetApp {
        TargetApp::new(self.name.clone(), self.path.clone())
    }
}

/// Contents of `apps.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsData {
    #[serde(default)]
    pub apps: Vec<AppEntry>,

    /// Set when the file existed but could not be loaded.
    #[serde(skip)]
    pub load_error: Option<String>,
}
