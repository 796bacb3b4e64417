use crate::email_transport::{EmailTransport, OutboundEmail, TransportError, TransportResponse};
use crate::environment::Environment;
use crate::error::BulkMailDispatcherError;
use crate::http_gateway::HttpGateway;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Default, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
}

/// [`EmailTransport`] backed by the Resend HTTP API.
#[derive(Clone)]
pub struct ResendTransport {
    http_gateway: HttpGateway,
    base_url: String,
    api_key: String,
}

impl ResendTransport {
    pub fn new(
        http_gateway: HttpGateway,
        base_url: &str,
        api_key: &str,
    ) -> Self {
        Self {
            http_gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_env(http_timeout_in_millis: u64) -> Result<Self, BulkMailDispatcherError> {
        let api_key = Environment::optional_string("RESEND_API_KEY").ok_or_else(|| BulkMailDispatcherError::configuration("RESEND_API_KEY is not set"))?;
        let base_url = Environment::string("RESEND_BASE_URL", DEFAULT_RESEND_BASE_URL);

        Ok(Self::new(HttpGateway::new(http_timeout_in_millis)?, &base_url, &api_key))
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    #[instrument(skip_all, name = "send_to_resend")]
    async fn send(
        &self,
        email: &OutboundEmail,
    ) -> Result<TransportResponse, TransportError> {
        let payload = serde_json::to_string(email).map_err(|error| TransportError::new(&format!("Failed to serialize email payload: {error}")))?;

        let response = self
            .http_gateway
            .client
            .post(self.emails_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|error| TransportError::new(&error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError {
                status: Some(status.as_u16()),
                message: Some(format!("Failed to read transport response body: {error}")),
                body_message: None,
            })?;

        if status.is_success() {
            return Ok(serde_json::from_str::<TransportResponse>(&body).unwrap_or_default());
        }

        let error_body = serde_json::from_str::<ResendErrorBody>(&body).unwrap_or_default();

        match error_body.message {
            Some(message) => Err(TransportError {
                status: Some(status.as_u16()),
                message: None,
                body_message: Some(message),
            }),
            None => Err(TransportError {
                status: Some(status.as_u16()),
                message: Some(format!("Transport responded with status {status} and body {body}")),
                body_message: None,
            }),
        }
    }
}
