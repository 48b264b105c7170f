/// Result code returned for an accepted request document.
pub const DOCUMENT_ACCEPTED: &str = "0000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingResponse {
    pub result: IncomingResult,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingResult {
    pub main: String,
    pub secondary: Option<String>,
    pub reason: Option<String>,
    /// Provider-side correlation id of the request
    pub guid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelResponse {
    pub main: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataCertificateResponse {
    pub main: String,
    pub certificate: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBinaryResponse {
    pub main: String,
    pub binary: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataStateResponse {
    pub main: String,
    pub state: Option<String>,
}
