pub mod http_client;
pub mod request_builder;
pub mod response_parser;
pub mod transport;
pub mod trust_store;
pub mod xml_signer;
