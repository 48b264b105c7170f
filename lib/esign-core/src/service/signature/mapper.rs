use ct_codecs::{Base64, Encoder};
use time::Duration;

use super::dto::{BinaryContentDTO, ReceiverDTO, SignatureRequestDTO};
use crate::config::core_config::SignatureConfig;
use crate::model::request_document::{
    BinaryContentGroup, BinaryContentItem, BinaryContentRule, BinaryContents, Contact,
    IncomingRequest, LegalIdentity, NodeLanguage, NodeProcess, NoticeMethod, PersonalData,
    ProcessMeta, Receiver, RequestMeta, UserDefined,
};
use crate::provider::request_builder::BuildError;

const TIME_TO_CLOSE_DAYS: i64 = 10;
const TIME_TO_SAVE_DAYS: i64 = 1825;
const ACCESS_MODE: &str = "LOGALTY_DIRECT_ACCESS_DOC_IN_FRAME";
const BINARY_CONTENT_GROUP_ID: u32 = 1;

pub(super) fn incoming_request(
    config: &SignatureConfig,
    receivers: &[ReceiverDTO],
    binary_contents: &[BinaryContentDTO],
    subject: &str,
    body: &str,
) -> Result<IncomingRequest, BuildError> {
    Ok(IncomingRequest {
        request_meta: request_meta(config),
        process_meta: process_meta(config, receivers, subject, body),
        binary_contents: binary_contents_from_dtos(binary_contents)?,
    })
}

fn request_meta(config: &SignatureConfig) -> RequestMeta {
    RequestMeta {
        process: NodeProcess::AcceptanceXpress,
        time_to_close: Duration::days(TIME_TO_CLOSE_DAYS),
        time_to_save: Duration::days(TIME_TO_SAVE_DAYS),
        retry_protocol: config.retry_protocol,
        synchronous: config.synchronous,
        userdefined: vec![UserDefined {
            name: "client".to_owned(),
            value: concat!("esign-core ", env!("CARGO_PKG_VERSION")).to_owned(),
        }],
    }
}

fn process_meta(
    config: &SignatureConfig,
    receivers: &[ReceiverDTO],
    subject: &str,
    body: &str,
) -> ProcessMeta {
    tracing::info!("Generating receivers: count={}", receivers.len());

    ProcessMeta {
        generator: config.generator_name.to_owned(),
        generator_email: config.generator_email.to_owned(),
        language: NodeLanguage::Es,
        receivers: receivers.iter().map(receiver_from_dto).collect(),
        subject: subject.to_owned(),
        body: body.to_owned(),
        access_mode: ACCESS_MODE.to_owned(),
        userdefined: vec![],
    }
}

fn receiver_from_dto(dto: &ReceiverDTO) -> Receiver {
    tracing::debug!(
        "Generating receiver: receiverId={}, ruleId={}, groupId={}",
        dto.receiver_id,
        dto.rule_id,
        dto.group_id
    );

    Receiver {
        receiver_id: dto.receiver_id,
        personal_data: PersonalData {
            name: dto.name.to_owned(),
            middle_name: String::new(),
            last_name1: dto.last_name1.to_owned(),
            last_name2: dto.last_name2.to_owned(),
        },
        contact: Contact {
            uuid: dto.uuid.clone(),
            phone: String::new(),
            mobile: dto.telephone.to_owned(),
            email: dto.email.to_owned(),
            preferred: NoticeMethod::Email,
            notice_method: NoticeMethod::Email,
        },
        legal_identity: LegalIdentity {
            document_type: dto.document_type.to_owned(),
            document_country: dto.document_country.to_owned(),
            document_number: dto.document_number.to_owned(),
        },
        binary_content_rules: vec![BinaryContentRule {
            rule_id: dto.rule_id,
            group_id: dto.group_id,
        }],
    }
}

fn binary_contents_from_dtos(dtos: &[BinaryContentDTO]) -> Result<BinaryContents, BuildError> {
    tracing::info!("Creating binary contents: items={}", dtos.len());

    let items = dtos
        .iter()
        .map(|dto| {
            if dto.contents.is_empty() {
                return Err(BuildError::EmptyBinaryContent(dto.binary_content_id));
            }

            let content = Base64::encode_to_string(&dto.contents)
                .map_err(|e| BuildError::Encoding(e.to_string()))?;

            tracing::debug!(
                "Added binary content item: id={}, filename={}.{}, sizeBytes={}",
                dto.binary_content_id,
                dto.filename,
                dto.extension,
                dto.contents.len()
            );

            Ok(BinaryContentItem {
                binary_content_id: dto.binary_content_id,
                encoding: dto.encoding.to_owned(),
                filename: format!("{}.{}", dto.filename, dto.extension),
                r#type: dto.r#type.to_owned(),
                content,
            })
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    Ok(BinaryContents {
        groups: vec![BinaryContentGroup {
            group_id: BINARY_CONTENT_GROUP_ID,
            member_ids: dtos.iter().map(|dto| dto.binary_content_id).collect(),
        }],
        items,
    })
}

/// Receivers for the given signers, numbered from 1 and bound to group and rule 1.
pub fn receivers_from_signature_requests(requests: &[SignatureRequestDTO]) -> Vec<ReceiverDTO> {
    (1..)
        .zip(requests)
        .map(|(receiver_id, request)| ReceiverDTO {
            name: request.signer_name.to_owned(),
            email: request.signer_email.to_owned(),
            uuid: request.signer_id.map(|id| id.to_string()),
            receiver_id,
            group_id: 1,
            rule_id: 1,
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use uuid::Uuid;

    use super::*;
    use crate::provider::{transport, trust_store};

    fn config() -> SignatureConfig {
        SignatureConfig {
            generator_name: "SOON".to_owned(),
            generator_email: "info@soon.es".to_owned(),
            retry_protocol: 4,
            synchronous: true,
            cert_path: None,
            cert_pin: SecretString::from(""),
            cancel_reason: "reason".to_owned(),
            trust_store: trust_store::Params::default(),
            transport: transport::Params {
                base_url: "https://provider.test".parse().unwrap(),
                proxy: None,
            },
        }
    }

    fn content(id: u32, contents: &[u8]) -> BinaryContentDTO {
        BinaryContentDTO {
            binary_content_id: id,
            group_id: 1,
            contents: contents.to_vec(),
            encoding: "UTF-8".to_owned(),
            filename: format!("document{id}"),
            extension: "pdf".to_owned(),
            r#type: "application/pdf".to_owned(),
        }
    }

    #[test]
    fn test_incoming_request_assembly() {
        let receivers = receivers_from_signature_requests(&[SignatureRequestDTO {
            signer_name: "Ana".to_owned(),
            signer_email: "ana@example.com".to_owned(),
            signer_id: None,
        }]);

        let request = incoming_request(
            &config(),
            &receivers,
            &[content(7, b"hello"), content(9, b"world")],
            "subject",
            "body",
        )
        .unwrap();

        assert_eq!(request.request_meta.process, NodeProcess::AcceptanceXpress);
        assert_eq!(request.request_meta.time_to_close, Duration::days(10));
        assert_eq!(request.request_meta.time_to_save, Duration::days(1825));
        assert_eq!(request.request_meta.retry_protocol, 4);
        assert!(request.request_meta.synchronous);

        assert_eq!(request.process_meta.generator, "SOON");
        assert_eq!(request.process_meta.generator_email, "info@soon.es");
        assert_eq!(request.process_meta.language, NodeLanguage::Es);
        assert_eq!(request.process_meta.subject, "subject");
        let receiver = &request.process_meta.receivers[0];
        assert_eq!(receiver.receiver_id, 1);
        assert_eq!(receiver.contact.email, "ana@example.com");
        assert_eq!(receiver.contact.notice_method, NoticeMethod::Email);
        assert_eq!(
            receiver.binary_content_rules,
            vec![BinaryContentRule {
                rule_id: 1,
                group_id: 1
            }]
        );

        assert_eq!(
            request.binary_contents.groups,
            vec![BinaryContentGroup {
                group_id: 1,
                member_ids: vec![7, 9]
            }]
        );
        let item = &request.binary_contents.items[0];
        assert_eq!(item.content, "aGVsbG8=");
        assert_eq!(item.filename, "document7.pdf");
        assert_eq!(item.r#type, "application/pdf");
    }

    #[test]
    fn test_empty_binary_content_fails() {
        let error = incoming_request(
            &config(),
            &[ReceiverDTO::default()],
            &[content(1, b"data"), content(2, b"")],
            "subject",
            "body",
        )
        .unwrap_err();

        assert!(matches!(error, BuildError::EmptyBinaryContent(2)));
        assert_eq!(
            error.to_string(),
            "Binary contents cannot be null or empty for id=2"
        );
    }

    #[test]
    fn test_receivers_are_numbered_from_one() {
        let signer_id = Uuid::new_v4();
        let receivers = receivers_from_signature_requests(&[
            SignatureRequestDTO {
                signer_name: "Ana".to_owned(),
                signer_email: "ana@example.com".to_owned(),
                signer_id: Some(signer_id),
            },
            SignatureRequestDTO {
                signer_name: "Luis".to_owned(),
                signer_email: "luis@example.com".to_owned(),
                signer_id: None,
            },
        ]);

        assert_eq!(receivers.len(), 2);
        assert_eq!(receivers[0].receiver_id, 1);
        assert_eq!(receivers[0].uuid, Some(signer_id.to_string()));
        assert_eq!(receivers[1].receiver_id, 2);
        assert_eq!(receivers[1].name, "Luis");
        assert_eq!(receivers[1].uuid, None);
        assert!(receivers.iter().all(|r| r.group_id == 1 && r.rule_id == 1));
        assert!(receivers.iter().all(|r| r.last_name1.is_empty()));
    }
}
