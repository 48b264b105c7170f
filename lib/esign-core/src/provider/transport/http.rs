use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use url::Url;

use super::{Params, SignatureTransport, TransportError};
use crate::model::operation::WireOperation;
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::provider::http_client::{self, HttpClient, XmlRequest};
use crate::provider::trust_store::{TrustContext, TrustState};

pub type HttpClientFactory = Arc<
    dyn Fn(&TrustState, Option<&Url>) -> Result<Arc<dyn HttpClient>, http_client::Error>
        + Send
        + Sync,
>;

/// Posts signed documents to `<base_url>/<operation path>`.
///
/// The HTTP client is created on first use from the initialized trust state.
pub struct HttpTransport {
    params: Params,
    trust_context: Arc<TrustContext>,
    client_factory: HttpClientFactory,
    client: OnceCell<Arc<dyn HttpClient>>,
}

impl HttpTransport {
    pub fn new(params: Params, trust_context: Arc<TrustContext>) -> Self {
        Self::with_client_factory(params, trust_context, Arc::new(reqwest_client_factory))
    }

    pub fn with_client_factory(
        params: Params,
        trust_context: Arc<TrustContext>,
        client_factory: HttpClientFactory,
    ) -> Self {
        Self {
            params,
            trust_context,
            client_factory,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Arc<dyn HttpClient>, TransportError> {
        self.client
            .get_or_try_init(|| async {
                let trust_state = self
                    .trust_context
                    .state()
                    .ok_or(TransportError::TrustNotInitialized)?;

                (self.client_factory)(trust_state, self.params.proxy.as_ref())
                    .map_err(TransportError::from)
            })
            .await
    }

    fn endpoint(&self, operation: WireOperation) -> Result<Url, TransportError> {
        let base = self.params.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", operation.path()))?)
    }
}

fn reqwest_client_factory(
    trust_state: &TrustState,
    proxy: Option<&Url>,
) -> Result<Arc<dyn HttpClient>, http_client::Error> {
    Ok(Arc::new(ReqwestClient::from_trust_state(trust_state, proxy)?))
}

#[async_trait]
impl SignatureTransport for HttpTransport {
    async fn send(
        &self,
        operation: WireOperation,
        request: String,
        certificate_id: &str,
    ) -> Result<String, TransportError> {
        let url = self.endpoint(operation)?;
        tracing::info!("Sending {operation} to signature provider...");

        let response = self
            .client()
            .await?
            .post_xml(XmlRequest {
                operation,
                url,
                certificate_id: certificate_id.to_owned(),
                body: request,
            })
            .await?
            .error_for_status()?;

        String::from_utf8(response.body).map_err(|_| TransportError::InvalidEncoding)
    }
}
