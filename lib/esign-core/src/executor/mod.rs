//! Generic request pipeline shared by every provider operation.
//!
//! A run ensures the trust material is initialized, then builds, transmits,
//! parses and validates the request through an [`OperationStages`]
//! implementation. Each stage completes before the next one starts and the
//! first failure ends the run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PipelineError, StepError};
use crate::provider::trust_store::{self, BundledResources, TrustContext, TrustStoreError};

/// Operation specific parts of a pipeline run.
#[async_trait]
pub trait OperationStages: Send + Sync {
    type Response: Send;

    /// Produces the signed request envelope.
    fn build_request(&self) -> Result<String, StepError>;

    async fn transmit(&self, request: String) -> Result<String, StepError>;

    fn parse_response(&self, raw: &str) -> Result<Self::Response, StepError>;

    fn is_success(&self, response: &Self::Response) -> bool;

    /// Reason reported when [`OperationStages::is_success`] returns `false`.
    fn error_message(&self, response: &Self::Response) -> String;

    /// Correlation id carried by a rejected response.
    fn reference(&self, _response: &Self::Response) -> Option<String> {
        None
    }
}

pub struct OperationExecutor {
    trust_context: Arc<TrustContext>,
    trust_store: trust_store::Params,
    bundled_resources: BundledResources,
}

impl OperationExecutor {
    pub fn new(
        trust_context: Arc<TrustContext>,
        trust_store: trust_store::Params,
        bundled_resources: BundledResources,
    ) -> Self {
        Self {
            trust_context,
            trust_store,
            bundled_resources,
        }
    }

    pub fn trust_context(&self) -> &Arc<TrustContext> {
        &self.trust_context
    }

    /// Initializes the trust material on the blocking pool.
    ///
    /// The filesystem work and the initialization lock never run on a runtime
    /// worker. Once the state is published this returns immediately.
    pub async fn initialize_trust(&self) -> Result<(), TrustStoreError> {
        if self.trust_context.state().is_some() {
            return Ok(());
        }

        let trust_context = self.trust_context.clone();
        let params = self.trust_store.clone();
        let bundled_resources = self.bundled_resources.clone();

        tokio::task::spawn_blocking(move || {
            trust_context
                .ensure(&params, &bundled_resources)
                .map(|_| ())
        })
        .await
        .map_err(|e| TrustStoreError::Io(std::io::Error::other(e)))?
    }

    pub async fn execute<S: OperationStages>(
        &self,
        operation_id: &str,
        stages: &S,
    ) -> Result<S::Response, PipelineError> {
        tracing::info!("Operation [{operation_id}]: start");

        let failed = |error: StepError| {
            tracing::error!("Operation [{operation_id}] failed: {error}");
            PipelineError::failed(operation_id, error)
        };

        self.initialize_trust()
            .await
            .map_err(|error| failed(error.into()))?;

        tracing::debug!("Operation [{operation_id}]: building request...");
        let request = stages.build_request().map_err(failed)?;
        tracing::debug!(
            "Operation [{operation_id}]: request built (length={})",
            request.len()
        );

        tracing::info!("Operation [{operation_id}]: sending request...");
        let raw = stages.transmit(request).await.map_err(failed)?;
        tracing::debug!(
            "Operation [{operation_id}]: response received (length={})",
            raw.len()
        );

        tracing::debug!("Operation [{operation_id}]: parsing response...");
        let response = stages.parse_response(&raw).map_err(failed)?;

        tracing::debug!("Operation [{operation_id}]: validating response...");
        if !stages.is_success(&response) {
            let reason = stages.error_message(&response);
            tracing::warn!("Operation [{operation_id}] failed validation: {reason}");
            return Err(PipelineError::rejected(
                operation_id,
                reason,
                stages.reference(&response),
            ));
        }

        tracing::info!("Operation [{operation_id}]: success");
        Ok(response)
    }
}
