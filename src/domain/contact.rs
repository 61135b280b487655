use std::{fmt, str::FromStr, sync::LazyLock};

use super::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 50;

static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

/// Identifier of a contact. Older collections use an integer counter,
/// newer ones a v4 UUID; both may live in the same collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Seq(u64),
    Uuid(Uuid),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Seq(n) => write!(f, "{n}"),
            ContactId::Uuid(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for ContactId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(n) = s.parse::<u64>() {
            return Ok(ContactId::Seq(n));
        }

        Uuid::parse_str(s)
            .map(ContactId::Uuid)
            .map_err(|_| AppError::Validation(format!("'{s}' is not a contact id")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(id: ContactId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Contact {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// How strictly phone numbers are checked on add/update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneRule {
    /// Exactly 10 decimal digits.
    #[default]
    TenDigits,
    /// Anything non-empty.
    Any,
}

impl FromStr for PhoneRule {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ten-digits" | "10" => Ok(PhoneRule::TenDigits),
            "any" => Ok(PhoneRule::Any),
            other => Err(AppError::Config(format!(
                "'{other}' is not a phone rule (ten-digits, any)"
            ))),
        }
    }
}

/// Store-level rules: both fields non-empty and the phone matching `rule`.
/// Values are checked as given; shaping the input is the form's job.
pub fn validate_contact(name: &str, phone: &str, rule: PhoneRule) -> Result<(), AppError> {
    if name.trim().is_empty() || phone.trim().is_empty() {
        return Err(AppError::Validation(NOTICE_MISSING_FIELDS.to_string()));
    }

    if rule == PhoneRule::TenDigits && !validate_number(phone) {
        return Err(AppError::Validation(NOTICE_INVALID_PHONE.to_string()));
    }

    Ok(())
}

/// Name and phone as the form submits them: trimmed, name at most
/// [`MAX_NAME_LEN`] characters.
#[derive(Debug, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub phone: String,
}

pub fn normalize_input(name: &str, phone: &str) -> Result<FormInput, AppError> {
    let name = name.trim();

    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(NOTICE_NAME_TOO_LONG.to_string()));
    }

    Ok(FormInput {
        name: name.to_string(),
        phone: phone.trim().to_string(),
    })
}

/// Exactly ten ASCII digits.
pub fn validate_number(phone: &str) -> bool {
    TEN_DIGITS.is_match(phone)
}
