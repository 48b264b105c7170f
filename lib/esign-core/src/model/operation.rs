use strum::Display;

/// Wire-level operation exposed by the signature provider.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WireOperation {
    Incoming,
    CancelRequest,
    CertificateRequest,
    SignedBinary,
    StatesExternalId,
}

impl WireOperation {
    /// Endpoint path, relative to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::CancelRequest => "update/cancel",
            Self::CertificateRequest => "data/certificate",
            Self::SignedBinary => "data/signedBinary",
            Self::StatesExternalId => "data/statesExternalId",
        }
    }
}
