use crate::environment::Environment;
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_BATCH_DELAY_IN_MILLIS: u64 = 1000;
pub const DEFAULT_SENDER_DISPLAY_NAME: &str = "Studybest";
pub const DEFAULT_HTTP_TIMEOUT_IN_MILLIS: u64 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherResources {
    pub batch_size: Option<usize>,
    pub batch_delay_in_millis: Option<u64>,
    pub sender_display_name: Option<String>,
    pub http_timeout_in_millis: Option<u64>,
}

impl Default for DispatcherResources {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherResources {
    pub fn new() -> Self {
        Self {
            batch_size: None,
            batch_delay_in_millis: None,
            sender_display_name: None,
            http_timeout_in_millis: None,
        }
    }

    pub fn from_env() -> Self {
        Self::new()
            .with_batch_size(Environment::usize("BULK_MAIL_BATCH_SIZE", DEFAULT_BATCH_SIZE))
            .with_batch_delay_in_millis(Environment::u64("BULK_MAIL_BATCH_DELAY_IN_MILLIS", DEFAULT_BATCH_DELAY_IN_MILLIS))
            .with_sender_display_name(&Environment::string("BULK_MAIL_SENDER_DISPLAY_NAME", DEFAULT_SENDER_DISPLAY_NAME))
            .with_http_timeout_in_millis(Environment::u64("HTTP_TIMEOUT_IN_MILLIS", DEFAULT_HTTP_TIMEOUT_IN_MILLIS))
    }

    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self {
            batch_size: Some(batch_size),
            ..self
        }
    }

    pub fn with_batch_delay_in_millis(
        self,
        batch_delay_in_millis: u64,
    ) -> Self {
        Self {
            batch_delay_in_millis: Some(batch_delay_in_millis),
            ..self
        }
    }

    pub fn with_sender_display_name(
        self,
        sender_display_name: &str,
    ) -> Self {
        Self {
            sender_display_name: Some(sender_display_name.to_string()),
            ..self
        }
    }

    pub fn with_http_timeout_in_millis(
        self,
        http_timeout_in_millis: u64,
    ) -> Self {
        Self {
            http_timeout_in_millis: Some(http_timeout_in_millis),
            ..self
        }
    }

    /// Never zero, `chunks` would panic on it.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_in_millis.unwrap_or(DEFAULT_BATCH_DELAY_IN_MILLIS))
    }

    pub fn effective_sender_display_name(&self) -> &str {
        self.sender_display_name.as_deref().unwrap_or(DEFAULT_SENDER_DISPLAY_NAME)
    }

    pub fn effective_http_timeout_in_millis(&self) -> u64 {
        self.http_timeout_in_millis.unwrap_or(DEFAULT_HTTP_TIMEOUT_IN_MILLIS)
    }
}

#[cfg(test)]
mod test {
    use super::DispatcherResources;
    use serial_test::serial;
    use std::env;
    use std::time::Duration;

    #[test]
    fn should_apply_defaults() {
        let resources = DispatcherResources::new();

        assert_eq!(50, resources.effective_batch_size());
        assert_eq!(Duration::from_millis(1000), resources.batch_delay());
        assert_eq!("Studybest", resources.effective_sender_display_name());
        assert_eq!(3000, resources.effective_http_timeout_in_millis());
    }

    #[test]
    fn should_clamp_zero_batch_size() {
        assert_eq!(1, DispatcherResources::new().with_batch_size(0).effective_batch_size());
    }

    #[test]
    #[serial]
    fn should_read_tunables_from_env() {
        env::set_var("BULK_MAIL_BATCH_SIZE", "10");
        env::set_var("BULK_MAIL_BATCH_DELAY_IN_MILLIS", "250");
        env::set_var("BULK_MAIL_SENDER_DISPLAY_NAME", "Newsletter");

        let resources = DispatcherResources::from_env();

        env::remove_var("BULK_MAIL_BATCH_SIZE");
        env::remove_var("BULK_MAIL_BATCH_DELAY_IN_MILLIS");
        env::remove_var("BULK_MAIL_SENDER_DISPLAY_NAME");

        assert_eq!(10, resources.effective_batch_size());
        assert_eq!(Duration::from_millis(250), resources.batch_delay());
        assert_eq!("Newsletter", resources.effective_sender_display_name());
    }
}
