use bulk_mail_dispatcher::error::BulkMailDispatcherError;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status_code: u16,
    pub cause: String,
    pub message: Option<String>,
}

impl AppError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: 500,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn bad_request(cause: &str) -> Self {
        Self {
            status_code: 400,
            cause: cause.to_string(),
            message: None,
        }
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl From<BulkMailDispatcherError> for AppError {
    fn from(inner: BulkMailDispatcherError) -> Self {
        Self {
            status_code: inner.status_code,
            cause: inner.cause,
            message: inner.message,
        }
    }
}
