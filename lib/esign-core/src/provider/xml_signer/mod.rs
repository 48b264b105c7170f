use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Failed to sign: {0}")]
    SigningError(Box<dyn Error + Send + Sync + 'static>),
    #[error("Certificate error: `{0}`")]
    Certificate(String),
}

impl SignerError {
    pub fn signing_error(e: impl Error + Send + Sync + 'static) -> Self {
        Self::SigningError(Box::new(e))
    }
}

/// Signs request documents with the configured certificate.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait XmlSigner: Send + Sync {
    fn sign(&self, document: &str) -> Result<String, SignerError>;

    /// Identifier of the signing certificate, sent along with every request.
    fn certificate_id(&self) -> Result<String, SignerError>;
}

/// Location and PIN of the signing certificate.
#[derive(Clone, Debug)]
pub struct CertificateParams {
    pub path: Option<PathBuf>,
    pub pin: SecretString,
}

/// Opens the signing certificate and returns a signer bound to it.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait XmlSignerFactory: Send + Sync {
    fn create(&self, certificate: &CertificateParams) -> Result<Arc<dyn XmlSigner>, SignerError>;
}
