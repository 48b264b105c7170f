use super::dto::{BinaryContentDTO, InitSignatureRequestDTO, ReceiverDTO};
use crate::service::error::ServiceError;

pub(super) fn validate_init_signature_request(
    request: &InitSignatureRequestDTO,
) -> Result<(&[ReceiverDTO], &[BinaryContentDTO]), ServiceError> {
    let Some(receivers) = request.receivers.as_deref().filter(|r| !r.is_empty()) else {
        return Err(ServiceError::InvalidInput(
            "Receiver list cannot be missing or empty".to_owned(),
        ));
    };

    let Some(binary_contents) = request
        .binary_contents
        .as_deref()
        .filter(|contents| !contents.is_empty())
    else {
        return Err(ServiceError::InvalidInput(
            "Binary contents list cannot be missing or empty".to_owned(),
        ));
    };

    Ok((receivers, binary_contents))
}
