use std::sync::Arc;

use config::core_config::SignatureConfig;
use executor::OperationExecutor;
use provider::request_builder::RequestDocumentBuilder;
use provider::response_parser::ResponseDocumentParser;
use provider::transport::SignatureTransport;
use provider::transport::http::HttpTransport;
use provider::trust_store::{BundledResources, TrustContext, TrustStoreError};
use provider::xml_signer::{SignerError, XmlSignerFactory};
use service::signature::SignatureService;

pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod provider;
pub mod service;

/// Collaborators implementing the provider's document formats and signing.
pub struct EsignProviders {
    pub request_builder: Arc<dyn RequestDocumentBuilder>,
    pub response_parser: Arc<dyn ResponseDocumentParser>,
    /// Opens the configured `certPath`/`certPin` certificate
    pub xml_signer_factory: Arc<dyn XmlSignerFactory>,
    /// Resources addressable through `classpath:` trust store locators
    pub bundled_resources: BundledResources,
}

#[derive(Clone)]
pub struct EsignCore {
    pub signature_service: SignatureService,
    executor: Arc<OperationExecutor>,
}

impl EsignCore {
    /// Wires the services against the process-wide trust context and the HTTP transport.
    pub fn new(config: SignatureConfig, providers: EsignProviders) -> Result<Self, SignerError> {
        let trust_context = TrustContext::global();
        let transport = Arc::new(HttpTransport::new(
            config.transport.clone(),
            trust_context.clone(),
        ));

        Self::with_transport(config, providers, trust_context, transport)
    }

    pub fn with_transport(
        config: SignatureConfig,
        providers: EsignProviders,
        trust_context: Arc<TrustContext>,
        transport: Arc<dyn SignatureTransport>,
    ) -> Result<Self, SignerError> {
        let xml_signer = providers
            .xml_signer_factory
            .create(&config.certificate())
            .inspect_err(|e| tracing::error!("Failed to open signing certificate: {e}"))?;

        let executor = Arc::new(OperationExecutor::new(
            trust_context,
            config.trust_store.clone(),
            providers.bundled_resources,
        ));

        Ok(Self {
            signature_service: SignatureService::new(
                Arc::new(config),
                executor.clone(),
                providers.request_builder,
                providers.response_parser,
                xml_signer,
                transport,
            ),
            executor,
        })
    }

    /// Prepares the trust material at startup instead of on the first operation.
    pub async fn initialize_trust(&self) -> Result<(), TrustStoreError> {
        self.executor.initialize_trust().await
    }
}

#[cfg(test)]
mod test;
