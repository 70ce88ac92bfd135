use serde::Serialize;

/// An NFC reader device, fixed or mobile.
#[derive(Debug, Clone, Serialize)]
pub struct Reader {
    pub id: i64,
    /// Unique device code (e.g. "LAB-001").
    pub code: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub location_id: Option<i64>,
}
