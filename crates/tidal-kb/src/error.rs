/// Errors raised while ingesting one of the knowledge-base documents.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("invalid API dump JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid autocomplete metadata XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("schema violation: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, KbError>;
