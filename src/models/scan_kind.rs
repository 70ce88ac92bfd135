use serde::Serialize;

/// Direction of a clocking action derived from a scan.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    In,
    Out,
}

impl ScanKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScanKind::In => "in",
            ScanKind::Out => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(ScanKind::In),
            "out" => Some(ScanKind::Out),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, ScanKind::In)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, ScanKind::Out)
    }
}

/// Channel a scan arrived through.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrigin {
    /// NFC hardware reader (default)
    Nfc,
    /// Direct API call
    Api,
    /// Backoffice / manual entry
    Admin,
}

impl ScanOrigin {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScanOrigin::Nfc => "nfc",
            ScanOrigin::Api => "api",
            ScanOrigin::Admin => "admin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "nfc" => Some(ScanOrigin::Nfc),
            "api" => Some(ScanOrigin::Api),
            "admin" => Some(ScanOrigin::Admin),
            _ => None,
        }
    }
}
