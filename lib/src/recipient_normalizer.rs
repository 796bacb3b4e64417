use crate::recipient::{Recipient, RecipientCandidate, RecipientRejection};
use serde_json::{Map, Value};
use tracing::{info, warn};

pub type RawRow = Map<String, Value>;

const EMAIL_KEYS: FieldResolver = FieldResolver::new(&["email", "Email", "EMAIL"]);
const NAME_KEYS: FieldResolver = FieldResolver::new(&["name", "Name", "NAME"]);

/// Ordered list of candidate column names, first usable hit wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    keys: &'static [&'static str],
}

impl FieldResolver {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    pub fn resolve(
        &self,
        row: &RawRow,
    ) -> Option<String> {
        self.keys.iter().filter_map(|key| row.get(*key)).find_map(cell_text)
    }
}

fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecipients {
    pub recipients: Vec<Recipient>,
    pub missing_email: usize,
    pub invalid_email: usize,
}

impl NormalizedRecipients {
    pub fn dropped(&self) -> usize {
        self.missing_email + self.invalid_email
    }
}

pub struct RecipientNormalizer;

impl RecipientNormalizer {
    pub fn normalize(rows: &[RawRow]) -> Vec<Recipient> {
        Self::normalize_with_report(rows).recipients
    }

    pub fn normalize_with_report(rows: &[RawRow]) -> NormalizedRecipients {
        let mut normalized = NormalizedRecipients::default();

        for (index, row) in rows.iter().enumerate() {
            let candidate = RecipientCandidate {
                email: EMAIL_KEYS.resolve(row),
                name: NAME_KEYS.resolve(row),
            };

            match Recipient::parse(candidate) {
                Ok(recipient) => normalized.recipients.push(recipient),
                Err(RecipientRejection::MissingEmail) => {
                    normalized.missing_email += 1;
                    warn!(row = index, "Skipping row without email");
                },
                Err(RecipientRejection::InvalidEmail(email)) => {
                    normalized.invalid_email += 1;
                    warn!(row = index, "Invalid email format detected: {email}");
                },
            }
        }

        info!(
            accepted = normalized.recipients.len(),
            dropped = normalized.dropped(),
            "Normalized {} rows",
            rows.len()
        );

        normalized
    }
}

#[cfg(test)]
mod test {
    use super::{RawRow, RecipientNormalizer};
    use serde_json::{json, Value};

    fn rows(value: Value) -> Vec<RawRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_prefer_lowercase_key_when_several_variants_are_present() {
        let rows = rows(json!([
            { "email": "lower@example.com", "Email": "capital@example.com", "NAME": "Upper", "name": "Lower" }
        ]));

        let recipients = RecipientNormalizer::normalize(&rows);

        assert_eq!(1, recipients.len());
        assert_eq!("lower@example.com", recipients[0].email());
        assert_eq!("Lower", recipients[0].name());
    }

    #[test]
    fn should_fall_through_blank_variants() {
        let rows = rows(json!([
            { "email": "  ", "Email": null, "EMAIL": " upper@example.com ", "Name": "Jane" }
        ]));

        let recipients = RecipientNormalizer::normalize(&rows);

        assert_eq!(1, recipients.len());
        assert_eq!("upper@example.com", recipients[0].email());
        assert_eq!("Jane", recipients[0].name());
    }

    #[test]
    fn should_drop_missing_and_invalid_rows_keeping_order() {
        let rows = rows(json!([
            { "email": "first@example.com" },
            { "name": "No Email" },
            { "Email": "not-an-email", "name": "Broken" },
            { "EMAIL": "second@example.com", "name": 42 }
        ]));

        let normalized = RecipientNormalizer::normalize_with_report(&rows);

        assert_eq!(1, normalized.missing_email);
        assert_eq!(1, normalized.invalid_email);
        assert_eq!(2, normalized.dropped());

        let emails = normalized.recipients.iter().map(|it| it.email()).collect::<Vec<_>>();
        assert_eq!(vec!["first@example.com", "second@example.com"], emails);
        assert_eq!("42", normalized.recipients[1].name());
    }

    #[test]
    fn should_return_empty_list_without_error() {
        assert!(RecipientNormalizer::normalize(&[]).is_empty());
        assert!(RecipientNormalizer::normalize(&rows(json!([{ "name": "Nobody" }]))).is_empty());
    }
}
