use serde::Serialize;

/// A person who clocks in and out with an NFC tag.
#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: i64,
    pub full_name: String,
    /// NFC tag UID bound to this worker (uppercase hex). None until assigned.
    pub tag_uid: Option<String>,
    pub is_active: bool,
}
