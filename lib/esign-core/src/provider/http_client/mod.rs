pub mod reqwest_client;

use std::fmt::Display;
use std::panic::Location;

use thiserror::Error;
use url::Url;

use crate::model::operation::WireOperation;

pub const CERTIFICATE_ID_HEADER: &str = "X-Certificate-Id";
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Posts signed XML documents to the signature provider.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn post_xml(&self, request: XmlRequest) -> Result<XmlResponse, Error>;
}

/// A signed document addressed to one provider endpoint.
#[derive(Clone, Debug)]
pub struct XmlRequest {
    pub operation: WireOperation,
    pub url: Url,
    pub certificate_id: String,
    pub body: String,
}

#[derive(Debug)]
pub struct XmlResponse {
    pub operation: WireOperation,
    pub certificate_id: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusCode(pub u16);

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("TLS configuration error: {0}")]
    Tls(String),
    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
    #[error("HTTP status code is error: {0}")]
    StatusCodeIsError(StatusCode),
}

impl XmlRequest {
    #[track_caller]
    pub(crate) fn log_failure(&self, error: Error) -> Error {
        let location = Location::caller();
        tracing::error!(
            operation = %self.operation,
            certificate_id = %self.certificate_id,
            url = %self.url,
            %location,
            "Posting to signature provider failed: {error}"
        );
        tracing::trace!(operation = %self.operation, body = %self.body, "Rejected request body");

        error
    }
}

impl XmlResponse {
    /// Fails on a 4xx/5xx status and logs the outcome against the wire operation.
    #[track_caller]
    pub fn error_for_status(self) -> Result<Self, Error> {
        let location = Location::caller();

        if self.status.is_client_error() || self.status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                certificate_id = %self.certificate_id,
                status = %self.status,
                %location,
                "Signature provider answered with an error status"
            );
            return Err(Error::StatusCodeIsError(self.status));
        }

        tracing::debug!(
            operation = %self.operation,
            certificate_id = %self.certificate_id,
            status = %self.status,
            %location,
            "Signature provider answered"
        );
        tracing::trace!(
            operation = %self.operation,
            body = %String::from_utf8_lossy(&self.body),
            "Response body"
        );

        Ok(self)
    }
}

impl StatusCode {
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
