use time::Duration;

/// Unsigned request document handed to the request builder.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestDocument {
    Incoming(Box<IncomingRequest>),
    Cancel { id: String, reason: String },
    DataCertificate { id: String },
    SignedBinary { id: String },
    DataStateByExternalId { external_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncomingRequest {
    pub request_meta: RequestMeta,
    pub process_meta: ProcessMeta,
    pub binary_contents: BinaryContents,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeProcess {
    AcceptanceXpress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeLanguage {
    Es,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeMethod {
    Email,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestMeta {
    pub process: NodeProcess,
    pub time_to_close: Duration,
    pub time_to_save: Duration,
    /// Retry count applied by the provider, not by this crate.
    pub retry_protocol: u32,
    pub synchronous: bool,
    pub userdefined: Vec<UserDefined>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefined {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessMeta {
    pub generator: String,
    pub generator_email: String,
    pub language: NodeLanguage,
    pub receivers: Vec<Receiver>,
    pub subject: String,
    pub body: String,
    pub access_mode: String,
    pub userdefined: Vec<UserDefined>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receiver {
    pub receiver_id: u32,
    pub personal_data: PersonalData,
    pub contact: Contact,
    pub legal_identity: LegalIdentity,
    pub binary_content_rules: Vec<BinaryContentRule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonalData {
    pub name: String,
    pub middle_name: String,
    pub last_name1: String,
    pub last_name2: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    pub uuid: Option<String>,
    pub phone: String,
    pub mobile: String,
    pub email: String,
    pub preferred: NoticeMethod,
    pub notice_method: NoticeMethod,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalIdentity {
    pub document_type: String,
    pub document_country: String,
    pub document_number: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryContentRule {
    pub rule_id: u32,
    pub group_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryContents {
    pub groups: Vec<BinaryContentGroup>,
    pub items: Vec<BinaryContentItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryContentGroup {
    pub group_id: u32,
    pub member_ids: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryContentItem {
    pub binary_content_id: u32,
    pub encoding: String,
    pub filename: String,
    pub r#type: String,
    /// Base64 encoded content
    pub content: String,
}
