use thiserror::Error;

/// Errors raised while building the language rule registry.
///
/// Classification itself never fails; these only surface from configuration input.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Malformed comment configuration '{reference}': {details}")]
    MalformedConfiguration { reference: String, details: String },

    #[error("Invalid association pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
