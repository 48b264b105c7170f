use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct ReceiverDTO {
    pub name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub telephone: String,
    pub email: String,
    pub document_type: String,
    pub document_country: String,
    pub document_number: String,
    pub receiver_id: u32,
    pub group_id: u32,
    pub rule_id: u32,
    pub uuid: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct BinaryContentDTO {
    pub binary_content_id: u32,
    pub group_id: u32,
    pub contents: Vec<u8>,
    pub encoding: String,
    pub filename: String,
    pub extension: String,
    pub r#type: String,
}

/// Signer as requested by the calling workflow.
#[derive(Clone, Debug)]
pub struct SignatureRequestDTO {
    pub signer_name: String,
    pub signer_email: String,
    pub signer_id: Option<Uuid>,
}

#[derive(Clone, Debug, Default)]
pub struct InitSignatureRequestDTO {
    pub receivers: Option<Vec<ReceiverDTO>>,
    pub binary_contents: Option<Vec<BinaryContentDTO>>,
    pub subject: String,
    pub body: String,
}
