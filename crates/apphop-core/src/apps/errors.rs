use crate::errors::AppHopError;
use crate::exec::ExecError;

#[derive(Debug, thiserror::Error)]
pub enum AppStoreError {
    #[error("No app matches '{query}'")]
    NotFound { query: String },

    #[error("App name cannot be empty")]
    EmptyName,

    #[error("An app with path '{path}' already exists")]
    AlreadyExists { path: String },

    #[error("Failed to save apps: {message}")]
    SaveFailed { message: String },
}

impl AppHopError for AppStoreError {
    fn error_code(&self) -> &'static str {
        match self {
            AppStoreError::NotFound { .. } => "APP_NOT_FOUND",
            AppStoreError::EmptyName => "APP_EMPTY_NAME",
            AppStoreError::AlreadyExists { .. } => "APP_ALREADY_EXISTS",
            AppStoreError::SaveFailed { .. } => "APP_SAVE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            AppStoreError::NotFound { .. }
            | AppStoreError::EmptyName
            | AppStoreError::AlreadyExists { .. } => true,

            AppStoreError::SaveFailed { .. } => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to resolve shortcuts: {source}")]
    ResolveFailed {
        #[from]
        source: ExecError,
    },

    #[error(transparent)]
    Store(#[from] AppStoreError),
}

impl AppHopError for ImportError {
    fn error_code(&self) -> &'static str {
        match self {
            ImportError::ResolveFailed { .. } => "IMPORT_RESOLVE_FAILED",
            ImportError::Store(inner) => inner.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ImportError::ResolveFailed { .. } => false,
            ImportError::Store(inner) => inner.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = AppStoreError::NotFound {
            query: "notepad".to_string(),
        };
        assert_eq!(error.to_string(), "No app matches 'notepad'");
        assert_eq!(error.error_code(), "APP_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_save_failed_is_not_user_error() {
        let error = AppStoreError::SaveFailed {
            message: "disk full".to_string(),
        };
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_import_error_delegates_store_code() {
        let error = ImportError::from(AppStoreError::EmptyName);
        assert_eq!(error.error_code(), "APP_EMPTY_NAME");
        assert_eq!(error.to_string(), "App name cannot be empty");
    }
}
