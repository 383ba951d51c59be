use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinHealthError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid slab table: {0}")]
    InvalidSlabTable(String),

    /// A structurally valid configuration that cannot serve the request,
    /// e.g. a bounded top slab that income runs past.
    #[error("Configuration defect: {0}")]
    ConfigurationDefect(String),

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinHealthError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinHealthError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for FinHealthError {
    fn from(e: serde_json::Error) -> Self {
        FinHealthError::SerializationError(e.to_string())
    }
}
