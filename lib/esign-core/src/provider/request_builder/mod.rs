use thiserror::Error;

use crate::model::request_document::RequestDocument;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Binary contents cannot be null or empty for id={0}")]
    EmptyBinaryContent(u32),
    #[error("Encoding error: `{0}`")]
    Encoding(String),
    #[error("Failed to build request document: `{0}`")]
    Document(String),
}

/// Serializes request documents into the provider's XML schema.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait RequestDocumentBuilder: Send + Sync {
    fn build(&self, document: &RequestDocument) -> Result<String, BuildError>;
}
