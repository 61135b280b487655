use thiserror::Error;

pub const NOTICE_MISSING_FIELDS: &str = "Please enter a contact name and phone number.";
pub const NOTICE_INVALID_PHONE: &str = "Please enter a valid phone number (10 digits).";
pub const NOTICE_NAME_TOO_LONG: &str = "Please enter a contact name of at most 50 characters.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on the terminal: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the key/value storage boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize contacts: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl AppError {
    /// The single message shown to the user at the boundary that caught the error.
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(item) => format!("{item} no longer exists."),
            AppError::Persistence(_) => "Something went wrong while saving your contacts. \
                Your changes are kept for this session."
                .to_string(),
            AppError::Config(msg) => msg.clone(),
            AppError::Io(_) => "Could not read your answer.".to_string(),
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, AppError::Persistence(_))
    }
}
