use serde::Serialize;

/// A physical site readers can be assigned to.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    /// Optional short code (e.g. "HQ").
    pub code: Option<String>,
    pub is_active: bool,
}
