use super::SignatureService;
use super::dto::InitSignatureRequestDTO;
use super::mapper::incoming_request;
use super::operations::{
    CANCEL, CERTIFICATE, INIT_SIGNATURE, INIT_SIGNATURE_OPERATION_ID, OperationDescriptor,
    SIGNED_BINARY, STATE, WorkflowStages,
};
use super::validator::validate_init_signature_request;
use crate::model::request_document::RequestDocument;
use crate::model::response_document::{
    CancelResponse, DataCertificateResponse, DataStateResponse, IncomingResult,
    SignedBinaryResponse,
};
use crate::provider::request_builder::BuildError;
use crate::service::error::ServiceError;

impl SignatureService {
    /// Starts a signature process for the given receivers and documents.
    ///
    /// Both lists must be present and non-empty, otherwise nothing is sent.
    pub async fn init_signature(
        &self,
        request: InitSignatureRequestDTO,
    ) -> Result<IncomingResult, ServiceError> {
        let (receivers, binary_contents) = validate_init_signature_request(&request)?;

        let stages = self.stages(&INIT_SIGNATURE, || {
            incoming_request(
                &self.config,
                receivers,
                binary_contents,
                &request.subject,
                &request.body,
            )
            .map(|incoming| RequestDocument::Incoming(Box::new(incoming)))
        });

        let response = self
            .executor
            .execute(INIT_SIGNATURE_OPERATION_ID, &stages)
            .await?;

        Ok(response.result)
    }

    pub async fn cancel_signature(&self, id: &str) -> Result<CancelResponse, ServiceError> {
        let stages = self.stages(&CANCEL, || {
            Ok(RequestDocument::Cancel {
                id: id.to_owned(),
                reason: self.config.cancel_reason.to_owned(),
            })
        });

        Ok(self.executor.execute(id, &stages).await?)
    }

    pub async fn get_certificate(&self, id: &str) -> Result<DataCertificateResponse, ServiceError> {
        let stages = self.stages(&CERTIFICATE, || {
            Ok(RequestDocument::DataCertificate { id: id.to_owned() })
        });

        Ok(self.executor.execute(id, &stages).await?)
    }

    pub async fn get_signed_binary(&self, id: &str) -> Result<SignedBinaryResponse, ServiceError> {
        let stages = self.stages(&SIGNED_BINARY, || {
            Ok(RequestDocument::SignedBinary { id: id.to_owned() })
        });

        Ok(self.executor.execute(id, &stages).await?)
    }

    pub async fn get_status(&self, external_id: &str) -> Result<DataStateResponse, ServiceError> {
        let stages = self.stages(&STATE, || {
            Ok(RequestDocument::DataStateByExternalId {
                external_id: external_id.to_owned(),
            })
        });

        Ok(self.executor.execute(external_id, &stages).await?)
    }

    fn stages<'a, R, F>(
        &'a self,
        descriptor: &'a OperationDescriptor<R>,
        document: F,
    ) -> WorkflowStages<'a, R, F>
    where
        F: Fn() -> Result<RequestDocument, BuildError>,
    {
        WorkflowStages {
            descriptor,
            document,
            request_builder: self.request_builder.as_ref(),
            xml_signer: self.xml_signer.as_ref(),
            response_parser: self.response_parser.as_ref(),
            transport: self.transport.as_ref(),
        }
    }
}
