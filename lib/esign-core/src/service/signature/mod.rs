use std::sync::Arc;

use crate::config::core_config::SignatureConfig;
use crate::executor::OperationExecutor;
use crate::provider::request_builder::RequestDocumentBuilder;
use crate::provider::response_parser::ResponseDocumentParser;
use crate::provider::transport::SignatureTransport;
use crate::provider::xml_signer::XmlSigner;

pub mod dto;
pub mod mapper;
mod operations;
pub mod service;
mod validator;

#[derive(Clone)]
pub struct SignatureService {
    config: Arc<SignatureConfig>,
    executor: Arc<OperationExecutor>,
    request_builder: Arc<dyn RequestDocumentBuilder>,
    response_parser: Arc<dyn ResponseDocumentParser>,
    xml_signer: Arc<dyn XmlSigner>,
    transport: Arc<dyn SignatureTransport>,
}

impl SignatureService {
    pub fn new(
        config: Arc<SignatureConfig>,
        executor: Arc<OperationExecutor>,
        request_builder: Arc<dyn RequestDocumentBuilder>,
        response_parser: Arc<dyn ResponseDocumentParser>,
        xml_signer: Arc<dyn XmlSigner>,
        transport: Arc<dyn SignatureTransport>,
    ) -> Self {
        Self {
            config,
            executor,
            request_builder,
            response_parser,
            xml_signer,
            transport,
        }
    }
}
