use reqwest::header::CONTENT_TYPE;
use reqwest::{Certificate, Proxy};
use url::Url;

use super::{
    CERTIFICATE_ID_HEADER, Error, HttpClient, StatusCode, XML_CONTENT_TYPE, XmlRequest,
    XmlResponse,
};
use crate::provider::trust_store::TrustState;

#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Client trusting the anchors of `trust_state`.
    ///
    /// PEM bundles and DER certificates are installed as root certificates, any
    /// other store type keeps the platform trust roots.
    pub fn from_trust_state(trust_state: &TrustState, proxy: Option<&Url>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();

        match trust_state.store_type().to_ascii_uppercase().as_str() {
            "PEM" => {
                let anchors = Certificate::from_pem_bundle(&read_trust_store(trust_state)?)
                    .map_err(|e| Error::Tls(e.to_string()))?;
                if anchors.is_empty() {
                    return Err(Error::Tls("no certificates in PEM trust store".to_owned()));
                }

                tracing::debug!(
                    "Installing {} trust anchors from {}",
                    anchors.len(),
                    trust_state.path().display()
                );
                for anchor in anchors {
                    builder = builder.add_root_certificate(anchor);
                }
            }
            "DER" => {
                let anchor = Certificate::from_der(&read_trust_store(trust_state)?)
                    .map_err(|e| Error::Tls(e.to_string()))?;
                builder = builder.add_root_certificate(anchor);
            }
            other => {
                tracing::warn!(
                    "Trust store type `{other}` cannot be installed into the HTTP client, using platform trust roots"
                );
            }
        }

        if let Some(proxy) = proxy {
            tracing::debug!("Routing signature provider traffic through {proxy}");
            builder = builder
                .proxy(Proxy::all(proxy.as_str()).map_err(|e| Error::InvalidProxy(e.to_string()))?);
        }

        Ok(Self {
            client: builder.build().map_err(|e| Error::Tls(e.to_string()))?,
        })
    }
}

fn read_trust_store(trust_state: &TrustState) -> Result<Vec<u8>, Error> {
    std::fs::read(trust_state.path()).map_err(|e| Error::Tls(e.to_string()))
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post_xml(&self, request: XmlRequest) -> Result<XmlResponse, Error> {
        tracing::debug!(
            operation = %request.operation,
            certificate_id = %request.certificate_id,
            "POST {}",
            request.url
        );

        let response = self
            .client
            .post(request.url.clone())
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(CERTIFICATE_ID_HEADER, request.certificate_id.as_str())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| request.log_failure(Error::HttpError(e.to_string())))?;

        let status = StatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| request.log_failure(Error::HttpError(e.to_string())))?;

        Ok(XmlResponse {
            operation: request.operation,
            certificate_id: request.certificate_id,
            status,
            body: body.to_vec(),
        })
    }
}
