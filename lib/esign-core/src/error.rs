use thiserror::Error;

use crate::provider::request_builder::BuildError;
use crate::provider::response_parser::ParseError;
use crate::provider::transport::TransportError;
use crate::provider::trust_store::TrustStoreError;
use crate::provider::xml_signer::SignerError;

/// Failure of a single pipeline step, kept as the cause of a [`PipelineError`].
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Trust store error: `{0}`")]
    TrustStore(#[from] TrustStoreError),
    #[error("Build failure: `{0}`")]
    Build(#[from] BuildError),
    #[error("Signing failure: `{0}`")]
    Sign(#[from] SignerError),
    #[error("Transport failure: `{0}`")]
    Transport(#[from] TransportError),
    #[error("Malformed response: `{0}`")]
    MalformedResponse(#[from] ParseError),
}

impl StepError {
    /// Human-readable reason supplied by the underlying failure, if any.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Transport(error) => error.reason(),
            Self::TrustStore(_) | Self::Build(_) | Self::Sign(_) | Self::MalformedResponse(_) => {
                None
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TrustStore(error) => error.error_code(),
            Self::Build(_) | Self::Sign(_) => ErrorCode::BuildFailure,
            Self::Transport(_) => ErrorCode::TransportFailure,
            Self::MalformedResponse(_) => ErrorCode::MalformedResponse,
        }
    }
}

/// Uniform failure of an operation run.
///
/// Either a step failed (`cause` is set, `code` is empty) or the provider
/// rejected the request (`code` is the operation id and `reason` comes from the
/// response).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PipelineError {
    operation_id: String,
    code: Option<String>,
    reason: Option<String>,
    reference: Option<String>,
    #[source]
    cause: Option<StepError>,
    message: String,
}

impl PipelineError {
    pub(crate) fn rejected(
        operation_id: &str,
        reason: String,
        reference: Option<String>,
    ) -> Self {
        Self {
            message: format!("Operation error ({operation_id}): {reason}"),
            operation_id: operation_id.to_owned(),
            code: Some(operation_id.to_owned()),
            reason: Some(reason),
            reference,
            cause: None,
        }
    }

    pub(crate) fn failed(operation_id: &str, cause: StepError) -> Self {
        Self {
            message: format!("Operation [{operation_id}] failed: {cause}"),
            operation_id: operation_id.to_owned(),
            code: None,
            reason: cause.reason(),
            reference: None,
            cause: Some(cause),
        }
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn cause(&self) -> Option<&StepError> {
        self.cause.as_ref()
    }

    pub fn error_code(&self) -> ErrorCode {
        match &self.cause {
            Some(cause) => cause.error_code(),
            None => ErrorCode::OperationRejected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    ResourceNotFound,
    TrustStore,
    BuildFailure,
    TransportFailure,
    MalformedResponse,
    OperationRejected,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input",
            ErrorCode::ResourceNotFound => "Trust store resource not found",
            ErrorCode::TrustStore => "Trust store initialization error",
            ErrorCode::BuildFailure => "Request document could not be built",
            ErrorCode::TransportFailure => "Signature provider could not be reached",
            ErrorCode::MalformedResponse => "Malformed provider response",
            ErrorCode::OperationRejected => "Operation rejected by signature provider",
        }
    }
}
