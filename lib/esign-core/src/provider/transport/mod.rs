use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::model::operation::WireOperation;
use crate::provider::http_client;

pub mod http;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Trust material is not initialized")]
    TrustNotInitialized,
    #[error("Invalid endpoint: `{0}`")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("HTTP client error: `{0}`")]
    HttpClient(#[from] http_client::Error),
    #[error("Response body is not valid UTF-8")]
    InvalidEncoding,
}

impl TransportError {
    /// Reason exposed on the pipeline error, if the failure carries one.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::HttpClient(http_client::Error::StatusCodeIsError(status)) => {
                Some(format!("HTTP status {status}"))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub base_url: Url,
    #[serde(default)]
    pub proxy: Option<Url>,
}

/// Delivers signed request documents to the signature provider.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SignatureTransport: Send + Sync {
    async fn send(
        &self,
        operation: WireOperation,
        request: String,
        certificate_id: &str,
    ) -> Result<String, TransportError>;
}
