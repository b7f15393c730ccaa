use std::path::Path;

use super::errors::AppStoreError;
use super::types::AppsData;

/// Load the app list from `path`.
///
/// A missing file is an empty list. A file that cannot be read or parsed
/// also yields an empty list, with `load_error` describing the problem.
pub fn load_apps(path: &Path) -> AppsData {
    if !path.exists() {
        return AppsData::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    event = "core.apps.json_parse_failed",
                    path = %path.display(),
                    error = %e,
                    "Apps file exists but contains invalid JSON"
                );
                AppsData {
                    load_error: Some(format!(
                        "Apps file corrupted ({}). Delete {} to reset.",
                        e,
                        path.display()
                    )),
                    ..Default::default()
                }
            }
        },
        Err(e) => {
            tracing::error!(
                event = "core.apps.load_failed",
                path = %path.display(),
                error = %e
            );
            AppsData {
                load_error: Some(format!(
                    "Failed to read apps file: {}. Check permissions on {}",
                    e,
                    path.display()
                )),
                ..Default::default()
            }
        }
    }
}

/// Save the app list to `path`, creating the parent directory.
pub fn save_apps(path: &Path, data: &AppsData) -> Result<(), AppStoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppStoreError::SaveFailed {
            message: format!("Failed to create directory ({}): {}", parent.display(), e),
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(|e| AppStoreError::SaveFailed {
        message: format!("Failed to serialize apps: {}", e),
    })?;

    std::fs::write(path, json).map_err(|e| AppStoreError::SaveFailed {
        message: format!("Failed to write apps file ({}): {}", path.display(), e),
    })?;

    tracing::info!(
        event = "core.apps.saved",
        path = %path.display(),
        count = data.apps.len()
    );

    Ok(())
}
