use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a derivation code prefix is not in the code table.
    #[error("unknown derivation code '{0}'")]
    UnknownCode(String),
}
