pub mod operation;
pub mod request_document;
pub mod response_document;
