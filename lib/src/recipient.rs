use crate::email_address::is_valid_email;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientCandidate {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A recipient whose email already passed validation. Fields are private so the
/// only way to build one is through [`Recipient::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    email: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientRejection {
    MissingEmail,
    InvalidEmail(String),
}

impl Recipient {
    pub fn parse(candidate: RecipientCandidate) -> Result<Self, RecipientRejection> {
        let email = candidate.email.map(|email| email.trim().to_string()).unwrap_or_default();

        if email.is_empty() {
            return Err(RecipientRejection::MissingEmail);
        }

        if !is_valid_email(&email) {
            return Err(RecipientRejection::InvalidEmail(email));
        }

        Ok(Self {
            email,
            name: candidate.name.map(|name| name.trim().to_string()).unwrap_or_default(),
        })
    }

    pub fn new(
        email: &str,
        name: &str,
    ) -> Result<Self, RecipientRejection> {
        Self::parse(RecipientCandidate {
            email: Some(email.to_string()),
            name: Some(name.to_string()),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RecipientRejection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RecipientRejection::MissingEmail => write!(f, "Row has no email"),
            RecipientRejection::InvalidEmail(email) => write!(f, "Invalid email format: {email}"),
        }
    }
}

impl std::error::Error for RecipientRejection {}
