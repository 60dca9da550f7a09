use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    ValidationError,
    TaskNotFound,
    StorageError,
    NotifierError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::StorageError => "STORAGE_ERROR",
            Self::NotifierError => "NOTIFIER_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct PensumError {
    pub code: ErrorCode,
    pub message: String,
}

impl PensumError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "pensum is not initialized. Run `pensum init` first.",
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn notifier(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotifierError, message)
    }
}

impl From<rusqlite::Error> for PensumError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}
