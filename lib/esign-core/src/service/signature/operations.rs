use async_trait::async_trait;

use crate::error::StepError;
use crate::executor::OperationStages;
use crate::model::operation::WireOperation;
use crate::model::request_document::RequestDocument;
use crate::model::response_document::{
    CancelResponse, DOCUMENT_ACCEPTED, DataCertificateResponse, DataStateResponse,
    IncomingResponse, SignedBinaryResponse,
};
use crate::provider::request_builder::{BuildError, RequestDocumentBuilder};
use crate::provider::response_parser::{ParseError, ResponseDocumentParser};
use crate::provider::transport::SignatureTransport;
use crate::provider::xml_signer::XmlSigner;

/// Static description of a provider operation.
pub(super) struct OperationDescriptor<R> {
    pub wire_operation: WireOperation,
    /// Result codes treated as success.
    pub accepted_codes: &'static [&'static str],
    pub parse: fn(&dyn ResponseDocumentParser, &str) -> Result<R, ParseError>,
    pub result_code: fn(&R) -> &str,
    pub reason: fn(&R) -> String,
    pub reference: fn(&R) -> Option<String>,
}

pub(super) const INIT_SIGNATURE_OPERATION_ID: &str = "INIT_SIGNATURE";

pub(super) static INIT_SIGNATURE: OperationDescriptor<IncomingResponse> = OperationDescriptor {
    wire_operation: WireOperation::Incoming,
    accepted_codes: &[DOCUMENT_ACCEPTED],
    parse: parse_incoming,
    result_code: incoming_code,
    reason: incoming_reason,
    reference: incoming_reference,
};

pub(super) static CANCEL: OperationDescriptor<CancelResponse> = OperationDescriptor {
    wire_operation: WireOperation::CancelRequest,
    accepted_codes: &[DOCUMENT_ACCEPTED],
    parse: parse_cancel,
    result_code: cancel_code,
    reason: |response| code_reason(&response.main),
    reference: no_reference,
};

pub(super) static CERTIFICATE: OperationDescriptor<DataCertificateResponse> = OperationDescriptor {
    wire_operation: WireOperation::CertificateRequest,
    accepted_codes: &[DOCUMENT_ACCEPTED],
    parse: parse_certificate,
    result_code: certificate_code,
    reason: |response| code_reason(&response.main),
    reference: no_reference,
};

pub(super) static SIGNED_BINARY: OperationDescriptor<SignedBinaryResponse> = OperationDescriptor {
    wire_operation: WireOperation::SignedBinary,
    accepted_codes: &[DOCUMENT_ACCEPTED],
    parse: parse_signed_binary,
    result_code: signed_binary_code,
    reason: |response| code_reason(&response.main),
    reference: no_reference,
};

pub(super) static STATE: OperationDescriptor<DataStateResponse> = OperationDescriptor {
    wire_operation: WireOperation::StatesExternalId,
    accepted_codes: &[DOCUMENT_ACCEPTED],
    parse: parse_state,
    result_code: state_code,
    reason: |response| code_reason(&response.main),
    reference: no_reference,
};

fn parse_incoming(
    parser: &dyn ResponseDocumentParser,
    raw: &str,
) -> Result<IncomingResponse, ParseError> {
    parser.parse_incoming(raw)
}

fn parse_cancel(parser: &dyn ResponseDocumentParser, raw: &str) -> Result<CancelResponse, ParseError> {
    parser.parse_cancel(raw)
}

fn parse_certificate(
    parser: &dyn ResponseDocumentParser,
    raw: &str,
) -> Result<DataCertificateResponse, ParseError> {
    parser.parse_certificate(raw)
}

fn parse_signed_binary(
    parser: &dyn ResponseDocumentParser,
    raw: &str,
) -> Result<SignedBinaryResponse, ParseError> {
    parser.parse_signed_binary(raw)
}

fn parse_state(
    parser: &dyn ResponseDocumentParser,
    raw: &str,
) -> Result<DataStateResponse, ParseError> {
    parser.parse_state(raw)
}

fn incoming_code(response: &IncomingResponse) -> &str {
    &response.result.main
}

fn cancel_code(response: &CancelResponse) -> &str {
    &response.main
}

fn certificate_code(response: &DataCertificateResponse) -> &str {
    &response.main
}

fn signed_binary_code(response: &SignedBinaryResponse) -> &str {
    &response.main
}

fn state_code(response: &DataStateResponse) -> &str {
    &response.main
}

fn incoming_reason(response: &IncomingResponse) -> String {
    response
        .result
        .reason
        .clone()
        .unwrap_or_else(|| code_reason(&response.result.main))
}

fn incoming_reference(response: &IncomingResponse) -> Option<String> {
    response.result.guid.clone()
}

fn code_reason(code: &str) -> String {
    format!("code={code}")
}

fn no_reference<R>(_: &R) -> Option<String> {
    None
}

/// Stages of one workflow call: document assembly, signing, transport and
/// parsing driven by an [`OperationDescriptor`].
pub(super) struct WorkflowStages<'a, R, F> {
    pub descriptor: &'a OperationDescriptor<R>,
    pub document: F,
    pub request_builder: &'a dyn RequestDocumentBuilder,
    pub xml_signer: &'a dyn XmlSigner,
    pub response_parser: &'a dyn ResponseDocumentParser,
    pub transport: &'a dyn SignatureTransport,
}

#[async_trait]
impl<R, F> OperationStages for WorkflowStages<'_, R, F>
where
    R: Send + Sync,
    F: Fn() -> Result<RequestDocument, BuildError> + Send + Sync,
{
    type Response = R;

    fn build_request(&self) -> Result<String, StepError> {
        let document = (self.document)()?;
        let unsigned = self.request_builder.build(&document)?;
        Ok(self.xml_signer.sign(&unsigned)?)
    }

    async fn transmit(&self, request: String) -> Result<String, StepError> {
        let certificate_id = self.xml_signer.certificate_id()?;

        Ok(self
            .transport
            .send(self.descriptor.wire_operation, request, &certificate_id)
            .await?)
    }

    fn parse_response(&self, raw: &str) -> Result<R, StepError> {
        Ok((self.descriptor.parse)(self.response_parser, raw)?)
    }

    fn is_success(&self, response: &R) -> bool {
        let code = (self.descriptor.result_code)(response);
        self.descriptor.accepted_codes.contains(&code)
    }

    fn error_message(&self, response: &R) -> String {
        (self.descriptor.reason)(response)
    }

    fn reference(&self, response: &R) -> Option<String> {
        (self.descriptor.reference)(response)
    }
}
