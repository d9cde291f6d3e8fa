use thiserror::Error;

/// Input rejected before any conversion work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("UID must not be empty")]
    EmptyInput,

    #[error("UID must contain digits only")]
    NonNumeric,

    #[error("UID must be 9-12 digits long, got {len}")]
    LengthOutOfRange { len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("backup generator could not produce a valid phone number")]
    BackupGenerationFailed,

    #[error("conversion failed: {message}")]
    Internal { message: String },
}

pub type ConversionResult<T> = Result<T, ConversionError>;

impl ConversionError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::Validation(ValidationError::EmptyInput) => "empty_input",
            ConversionError::Validation(ValidationError::NonNumeric) => "non_numeric",
            ConversionError::Validation(ValidationError::LengthOutOfRange { .. }) => {
                "length_out_of_range"
            }
            ConversionError::BackupGenerationFailed => "backup_generation_failed",
            ConversionError::Internal { .. } => "internal",
        }
    }

    /// Caller sent a bad uid, as opposed to the server failing to produce a number.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ConversionError::Validation(_))
    }
}

/// Rejected table contents when building a converter from non-default data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("prefix table must not be empty")]
    EmptyPrefixTable,

    #[error("prefix {prefix:?} must be a non-empty digit string")]
    InvalidPrefix { prefix: String },

    #[error("special mapping key {uid:?} is not a valid UID: {reason}")]
    InvalidSpecialKey {
        uid: String,
        reason: ValidationError,
    },
}
