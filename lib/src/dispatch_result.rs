use crate::send_outcome::SendOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountingFault {
    pub expected: usize,
    pub processed: usize,
}

/// Sole artifact handed to settlement. Billing must read `sent`, never the size
/// of the upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<SendOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_fault: Option<AccountingFault>,
}

impl DispatchResult {
    pub fn empty() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Result for a dispatch that never reached the transport.
    pub fn aborted(
        total: usize,
        error: &str,
    ) -> Self {
        Self {
            success: false,
            sent: 0,
            failed: total,
            total,
            outcomes: vec![],
            error: Some(error.to_string()),
            accounting_fault: None,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.sent + self.failed == self.total
    }
}
