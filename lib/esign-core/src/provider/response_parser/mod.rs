use thiserror::Error;

use crate::model::response_document::{
    CancelResponse, DataCertificateResponse, DataStateResponse, IncomingResponse,
    SignedBinaryResponse,
};

#[derive(Debug, Error)]
#[error("Invalid {document} document: {reason}")]
pub struct ParseError {
    pub document: &'static str,
    pub reason: String,
}

impl ParseError {
    pub fn new(document: &'static str, reason: impl Into<String>) -> Self {
        Self {
            document,
            reason: reason.into(),
        }
    }
}

/// Parses raw provider responses into typed documents.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ResponseDocumentParser: Send + Sync {
    fn parse_incoming(&self, raw: &str) -> Result<IncomingResponse, ParseError>;
    fn parse_cancel(&self, raw: &str) -> Result<CancelResponse, ParseError>;
    fn parse_certificate(&self, raw: &str) -> Result<DataCertificateResponse, ParseError>;
    fn parse_signed_binary(&self, raw: &str) -> Result<SignedBinaryResponse, ParseError>;
    fn parse_state(&self, raw: &str) -> Result<DataStateResponse, ParseError>;
}
