use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::info;

use super::errors::AppStoreError;
use super::import::{ShortcutCandidate, normalize_path};
use super::persistence::{load_apps, save_apps};
use super::types::{AppEntry, AppsData};
use crate::config::Config;

/// Counts from merging shortcut candidates into the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

/// The app list bound to its backing file. Every mutation saves immediately.
#[derive(Debug)]
pub struct AppStore {
    path: PathBuf,
    data: AppsData,
}

impl AppStore {
    pub fn open(config: &Config) -> Self {
        Self::open_at(config.apps_file())
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load_apps(&path);
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.data.apps
    }

    pub fn load_error(&self) -> Option<&str> {
        self.data.load_error.as_deref()
    }

    /// Look up by exact id, then by case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&AppEntry> {
        self.index_of(query).map(|i| &self.data.apps[i])
    }

    fn index_of(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        self.data
            .apps
            .iter()
            .position(|app| app.id == query)
            .or_else(|| {
                self.data
                    .apps
                    .iter()
                    .position(|app| app.name.eq_ignore_ascii_case(query))
            })
    }

    fn require(&self, query: &str) -> Result<usize, AppStoreError> {
        self.index_of(query).ok_or_else(|| AppStoreError::NotFound {
            query: query.to_string(),
        })
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        let wanted = normalize_path(path);
        self.data
            .apps
            .iter()
            .any(|app| normalize_path(&app.path) == wanted)
    }

    pub fn add(
        &mut self,
        name: &str,
        path: &Path,
        args: Vec<String>,
    ) -> Result<AppEntry, AppStoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppStoreError::EmptyName);
        }
        if self.contains_path(path) {
            return Err(AppStoreError::AlreadyExists {
                path: path.display().to_string(),
            });
        }

        let entry = AppEntry::new(name, path, args);
        self.data.apps.push(entry.clone());
        self.save()?;

        info!(
            event = "core.apps.add_completed",
            id = %entry.id,
            name = %entry.name,
            path = %entry.path.display()
        );
        Ok(entry)
    }

    pub fn remove(&mut self, query: &str) -> Result<AppEntry, AppStoreError> {
        let index = self.require(query)?;
        let removed = self.data.apps.remove(index);
        self.save()?;

        info!(event = "core.apps.remove_completed", id = %removed.id, name = %removed.name);
        Ok(removed)
    }

    pub fn rename(&mut self, query: &str, new_name: &str) -> Result<AppEntry, AppStoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppStoreError::EmptyName);
        }
        let index = self.require(query)?;
        self.data.apps[index].name = new_name.to_string();
        self.save()?;

        let entry = self.data.apps[index].clone();
        info!(event = "core.apps.rename_completed", id = %entry.id, name = %entry.name);
        Ok(entry)
    }

    /// Remove every app. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, AppStoreError> {
        let count = self.data.apps.len();
        self.data.apps.clear();
        self.save()?;

        info!(event = "core.apps.clear_completed", count = count);
        Ok(count)
    }

    /// Add candidates whose path is not already listed. Duplicate
    /// candidates (by normalized path) count once.
    pub fn import(
        &mut self,
        candidates: &[ShortcutCandidate],
    ) -> Result<ImportSummary, AppStoreError> {
        let existing: HashSet<String> = self
            .data
            .apps
            .iter()
            .map(|app| normalize_path(&app.path))
            .collect();

        let mut seen = HashSet::new();
        let mut summary = ImportSummary::default();
        for candidate in candidates {
            let key = normalize_path(&candidate.path);
            if !seen.insert(key.clone()) {
                continue;
            }
            if existing.contains(&key) {
                summary.skipped += 1;
                continue;
            }
            self.data.apps.push(AppEntry::new(
                candidate.name.clone(),
                candidate.path.clone(),
                Vec::new(),
            ));
            summary.added += 1;
        }

        if summary.added > 0 {
            self.save()?;
        }

        info!(
            event = "core.apps.import_completed",
            added = summary.added,
            skipped = summary.skipped
        );
        Ok(summary)
    }

    fn save(&self) -> Result<(), AppStoreError> {
        save_apps(&self.path, &self.data)
    }
}
