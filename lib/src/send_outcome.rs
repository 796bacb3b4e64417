use crate::recipient::Recipient;
use serde::Serialize;

pub const NOT_ACCEPTED_ERROR: &str = "Email not accepted by API - may cause bounce";
pub const BOUNCE_RISK_PREFIX: &str = "Bounce risk: ";

const BOUNCE_KEYWORDS: [&str; 4] = ["bounce", "invalid", "unverified", "domain"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub email: String,
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn accepted(
        recipient: &Recipient,
        response_id: &str,
    ) -> Self {
        Self {
            email: recipient.email().to_string(),
            name: recipient.name().to_string(),
            success: true,
            response_id: Some(response_id.to_string()),
            error: None,
        }
    }

    pub fn failed(
        recipient: &Recipient,
        error: &str,
    ) -> Self {
        Self {
            email: recipient.email().to_string(),
            name: recipient.name().to_string(),
            success: false,
            response_id: None,
            error: Some(error.to_string()),
        }
    }

    /// Failure coming from the transport itself; the text gets the bounce marker
    /// when it looks like permanent undeliverability.
    pub fn rejected(
        recipient: &Recipient,
        error: &str,
    ) -> Self {
        Self::failed(recipient, &classify_error(error))
    }
}

pub fn classify_error(error: &str) -> String {
    let lowercase = error.to_lowercase();

    if BOUNCE_KEYWORDS.iter().any(|keyword| lowercase.contains(keyword)) {
        format!("{BOUNCE_RISK_PREFIX}{error}")
    } else {
        error.to_string()
    }
}
