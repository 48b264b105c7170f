use std::path::Path;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use wiremock::http::Method;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::core_config::SignatureConfig;
use crate::error::ErrorCode;
use crate::model::response_document::DataStateResponse;
use crate::provider::http_client::CERTIFICATE_ID_HEADER;
use crate::provider::request_builder::MockRequestDocumentBuilder;
use crate::provider::response_parser::MockResponseDocumentParser;
use crate::provider::transport::http::HttpTransport;
use crate::provider::transport::{self, MockSignatureTransport};
use crate::provider::trust_store::{self, BundledResources, TrustContext};
use crate::provider::xml_signer::{MockXmlSigner, MockXmlSignerFactory, SignerError, XmlSigner};
use crate::service::error::ServiceError;
use crate::{EsignCore, EsignProviders};

fn providers(response_parser: MockResponseDocumentParser) -> EsignProviders {
    let mut request_builder = MockRequestDocumentBuilder::new();
    request_builder
        .expect_build()
        .returning(|_| Ok("<dataStateExternalIdRequest/>".to_owned()));

    let mut xml_signer = MockXmlSigner::new();
    xml_signer
        .expect_sign()
        .returning(|document| Ok(format!("<signed>{document}</signed>")));
    xml_signer
        .expect_certificate_id()
        .returning(|| Ok("7694".to_owned()));

    let xml_signer: Arc<dyn XmlSigner> = Arc::new(xml_signer);
    let mut xml_signer_factory = MockXmlSignerFactory::new();
    xml_signer_factory
        .expect_create()
        .withf(|certificate| {
            certificate.path.as_deref() == Some(Path::new("/etc/esign/signature.pfx"))
                && certificate.pin.expose_secret() == "1234"
        })
        .once()
        .returning(move |_| Ok(xml_signer.clone()));

    EsignProviders {
        request_builder: Arc::new(request_builder),
        response_parser: Arc::new(response_parser),
        xml_signer_factory: Arc::new(xml_signer_factory),
        bundled_resources: BundledResources::new().with("truststore.jks", b"trust".as_slice()),
    }
}

fn config(base_url: &str) -> SignatureConfig {
    SignatureConfig {
        generator_name: "SOON".to_owned(),
        generator_email: "info@soon.es".to_owned(),
        retry_protocol: 3,
        synchronous: false,
        cert_path: Some("/etc/esign/signature.pfx".into()),
        cert_pin: SecretString::from("1234"),
        cancel_reason: "Cancelled by requester".to_owned(),
        trust_store: trust_store::Params {
            resource: "classpath:truststore.jks".to_owned(),
            ..Default::default()
        },
        transport: transport::Params {
            base_url: base_url.parse().unwrap(),
            proxy: None,
        },
    }
}

fn esign_core(
    base_url: &str,
    temp_dir: &tempfile::TempDir,
    parser: MockResponseDocumentParser,
) -> EsignCore {
    let config = config(base_url);
    let trust_context = Arc::new(TrustContext::with_temp_dir(temp_dir.path()));
    let transport = Arc::new(HttpTransport::new(
        config.transport.clone(),
        trust_context.clone(),
    ));

    EsignCore::with_transport(config, providers(parser), trust_context, transport).unwrap()
}

#[tokio::test]
async fn test_status_round_trip_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::POST))
        .and(path("/data/statesExternalId"))
        .and(header(CERTIFICATE_ID_HEADER, "7694"))
        .and(body_string(
            "<signed><dataStateExternalIdRequest/></signed>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<state>SIGNED</state>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut parser = MockResponseDocumentParser::new();
    parser
        .expect_parse_state()
        .withf(|raw| raw == "<state>SIGNED</state>")
        .returning(|_| {
            Ok(DataStateResponse {
                main: "0000".to_owned(),
                state: Some("SIGNED".to_owned()),
            })
        });

    let temp_dir = tempfile::tempdir().unwrap();
    let core = esign_core(&mock_server.uri(), &temp_dir, parser);

    let response = core.signature_service.get_status("ext-1").await.unwrap();

    assert_eq!(response.state.as_deref(), Some("SIGNED"));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_http_error_status_is_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method(Method::POST))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut parser = MockResponseDocumentParser::new();
    parser.expect_parse_signed_binary().never();

    let temp_dir = tempfile::tempdir().unwrap();
    let core = esign_core(&mock_server.uri(), &temp_dir, parser);

    let error = core
        .signature_service
        .get_signed_binary("req-1")
        .await
        .unwrap_err();

    assert_eq!(error.error_code(), ErrorCode::TransportFailure);
    let ServiceError::Pipeline(error) = error else {
        panic!("expected pipeline error");
    };
    assert_eq!(error.operation_id(), "req-1");
    assert_eq!(error.reason(), Some("HTTP status 503"));
}

#[test]
fn test_unreadable_signing_certificate_fails_setup() {
    let mut xml_signer_factory = MockXmlSignerFactory::new();
    xml_signer_factory
        .expect_create()
        .once()
        .returning(|_| Err(SignerError::Certificate("wrong PIN".to_owned())));

    let providers = EsignProviders {
        request_builder: Arc::new(MockRequestDocumentBuilder::new()),
        response_parser: Arc::new(MockResponseDocumentParser::new()),
        xml_signer_factory: Arc::new(xml_signer_factory),
        bundled_resources: BundledResources::new(),
    };
    let mut transport = MockSignatureTransport::new();
    transport.expect_send().never();

    let result = EsignCore::with_transport(
        config("https://provider.test"),
        providers,
        Arc::new(TrustContext::new()),
        Arc::new(transport),
    );

    assert!(matches!(result, Err(SignerError::Certificate(m)) if m == "wrong PIN"));
}

#[tokio::test]
async fn test_trust_initialized_at_startup() {
    let temp_dir = tempfile::tempdir().unwrap();
    let core = esign_core(
        "https://provider.test",
        &temp_dir,
        MockResponseDocumentParser::new(),
    );

    core.initialize_trust().await.unwrap();

    let files = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("truststore") && files[0].ends_with(".jks"));
}
