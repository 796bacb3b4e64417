use std::env;
use std::str::FromStr;
use tracing::warn;

pub struct Environment;

impl Environment {
    pub fn string(
        env_name: &str,
        default: &str,
    ) -> String {
        env::var(env_name).ok().unwrap_or(default.to_string())
    }

    pub fn optional_string(env_name: &str) -> Option<String> {
        env::var(env_name).ok().filter(|value| !value.trim().is_empty())
    }

    pub fn u64(
        env_name: &str,
        default: u64,
    ) -> u64 {
        Self::parse(env_name, default)
    }

    pub fn usize(
        env_name: &str,
        default: usize,
    ) -> usize {
        Self::parse(env_name, default)
    }

    fn parse<T>(
        env_name: &str,
        default: T,
    ) -> T
    where
        T: FromStr + Copy,
    {
        match env::var(env_name) {
            Ok(value) => value.trim().parse::<T>().unwrap_or_else(|_| {
                warn!("Ignoring unparsable value {value:?} for {env_name}, using default");
                default
            }),
            Err(_) => default,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Environment;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn should_fallback_to_default_when_value_is_not_a_number() {
        env::set_var("BULK_MAIL_TEST_NUMBER", "fifty");
        assert_eq!(50, Environment::usize("BULK_MAIL_TEST_NUMBER", 50));

        env::set_var("BULK_MAIL_TEST_NUMBER", " 20 ");
        assert_eq!(20, Environment::usize("BULK_MAIL_TEST_NUMBER", 50));

        env::remove_var("BULK_MAIL_TEST_NUMBER");
        assert_eq!(7, Environment::u64("BULK_MAIL_TEST_NUMBER", 7));
    }

    #[test]
    #[serial]
    fn should_treat_blank_string_as_missing() {
        env::set_var("BULK_MAIL_TEST_STRING", "   ");
        assert_eq!(None, Environment::optional_string("BULK_MAIL_TEST_STRING"));

        env::remove_var("BULK_MAIL_TEST_STRING");
        assert_eq!("fallback", Environment::string("BULK_MAIL_TEST_STRING", "fallback"));
    }
}
