use std::collections::HashMap;

/// 遞送狀態，持久化到 CSV 的 SENT 欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentStatus {
    #[default]
    Unsent,
    Sent,
    Failed,
}

impl SentStatus {
    /// Parses the SENT cell. A value starting with "YES" counts as sent,
    /// "FAILED" as failed, anything else (blank, absent, garbage) as unsent.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell.map(str::trim) {
            Some(value) if value.starts_with("YES") => SentStatus::Sent,
            Some("FAILED") => SentStatus::Failed,
            _ => SentStatus::Unsent,
        }
    }

    /// CSV literal for this status; `None` renders as a blank cell.
    pub fn as_cell(&self) -> Option<&'static str> {
        match self {
            SentStatus::Unsent => None,
            SentStatus::Sent => Some("YES"),
            SentStatus::Failed => Some("FAILED"),
        }
    }
}

/// One row of the working dataset. After normalization `number` holds exactly
/// one phone number, `+`-prefixed, with no whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub company: String,
    pub number: String,
    pub status: SentStatus,
}

/// Input to the external send capability.
#[derive(Debug, Clone)]
pub struct TemplateMessage {
    pub to: String,
    pub template_sid: String,
    pub variables: HashMap<String, String>,
    pub media_urls: Vec<String>,
}

/// Success value of the send capability.
#[derive(Debug, Clone)]
pub struct MessageReceipt {
    pub sid: String,
    pub status: Option<String>,
}

/// Per-run counters, for logging only. The persisted SENT column stays the
/// sole failure report.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchStats {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_cell() {
        assert_eq!(SentStatus::from_cell(None), SentStatus::Unsent);
        assert_eq!(SentStatus::from_cell(Some("")), SentStatus::Unsent);
        assert_eq!(SentStatus::from_cell(Some("YES")), SentStatus::Sent);
        assert_eq!(SentStatus::from_cell(Some("YES ")), SentStatus::Sent);
        assert_eq!(SentStatus::from_cell(Some("FAILED")), SentStatus::Failed);
        assert_eq!(SentStatus::from_cell(Some("maybe")), SentStatus::Unsent);
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(SentStatus::from_cell(SentStatus::Sent.as_cell()), SentStatus::Sent);
        assert_eq!(SentStatus::from_cell(SentStatus::Failed.as_cell()), SentStatus::Failed);
        assert_eq!(SentStatus::from_cell(SentStatus::Unsent.as_cell()), SentStatus::Unsent);
    }
}
