use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InsufficientCredits,
    Transport,
}

#[derive(Debug)]
pub struct BulkMailDispatcherError {
    pub kind: ErrorKind,
    pub status_code: u16,
    pub cause: String,
    pub message: Option<String>,
}

impl BulkMailDispatcherError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status_code: 500,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn configuration(cause: &str) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            status_code: 500,
            cause: cause.to_string(),
            message: Some("Dispatch aborted before any email was sent".to_string()),
        }
    }

    pub fn insufficient_credits(
        available: u64,
        required: u64,
    ) -> Self {
        Self {
            kind: ErrorKind::InsufficientCredits,
            status_code: 400,
            cause: format!("Insufficient credits. You have {available} credits but need {required}"),
            message: None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}

impl std::error::Error for BulkMailDispatcherError {}

impl fmt::Display for BulkMailDispatcherError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}
