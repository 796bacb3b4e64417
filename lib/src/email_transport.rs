use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransportResponseData {
    pub id: Option<String>,
}

/// Accepts both `{ "id": ... }` and `{ "data": { "id": ... } }` shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransportResponse {
    pub id: Option<String>,
    pub data: Option<TransportResponseData>,
}

impl TransportResponse {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            data: None,
        }
    }

    pub fn accepted_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.id.as_deref())
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub body_message: Option<String>,
}

impl TransportError {
    pub fn new(message: &str) -> Self {
        Self {
            status: None,
            message: Some(message.to_string()),
            body_message: None,
        }
    }

    pub fn describe(&self) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .or_else(|| self.body_message.as_deref().filter(|message| !message.is_empty()))
            .unwrap_or("Unknown error")
            .to_string()
    }
}

impl fmt::Display for TransportError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(
        &self,
        email: &OutboundEmail,
    ) -> Result<TransportResponse, TransportError>;
}
