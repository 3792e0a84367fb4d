use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PAYLOAD_DELIMITER, PAYLOAD_MIN_FIELDS};

/// Field positions in the ID-card QR payload.
const FIELD_ID: usize = 0;
const FIELD_FULL_NAME: usize = 2;
const FIELD_BIRTH_DATE: usize = 3;
const FIELD_SEX: usize = 4;
const FIELD_ADDRESS: usize = 5;

/// A QR code was read but its content is not an ID-card payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload has {found} fields, at least {PAYLOAD_MIN_FIELDS} required")]
    TooFewFields { found: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Interpret free text or a digit code. Never guesses: anything not
    /// recognised is `Unknown`.
    pub fn parse(raw: &str) -> Sex {
        let v = raw.trim().to_lowercase();
        if v.contains("nam") || v == "1" || v == "male" {
            Sex::Male
        } else if v.contains("nữ") || v.contains("nu") || v == "0" || v == "female" {
            Sex::Female
        } else {
            Sex::Unknown
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unknown => Ok(()),
        }
    }
}

/// Structured fields of an ID-card QR payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id_number: String,
    pub full_name: String,
    /// `None` when the raw value has an unrecognised shape or is not a real date.
    pub birth_date: Option<NaiveDate>,
    pub sex: Sex,
    pub address: String,
}

impl IdentityRecord {
    /// Birth date as `YYYY-MM-DD`, or empty.
    pub fn birth_date_iso(&self) -> String {
        self.birth_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Split a raw payload on `|` into an [`IdentityRecord`].
///
/// All-or-nothing: fewer than six fields is an error, never a partial record.
pub fn parse_payload(raw: &str) -> Result<IdentityRecord, PayloadError> {
    let fields: Vec<&str> = raw.trim().split(PAYLOAD_DELIMITER).collect();
    if fields.len() < PAYLOAD_MIN_FIELDS {
        return Err(PayloadError::TooFewFields {
            found: fields.len(),
        });
    }

    Ok(IdentityRecord {
        id_number: fields[FIELD_ID].trim().to_string(),
        full_name: fields[FIELD_FULL_NAME].trim().to_string(),
        birth_date: parse_birth_date(fields[FIELD_BIRTH_DATE]),
        sex: Sex::parse(fields[FIELD_SEX]),
        address: fields[FIELD_ADDRESS].trim().to_string(),
    })
}

/// Accepts `DDMMYYYY` or `D/M/YYYY` (one- or two-digit day and month).
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let v = raw.trim();
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let (day, month, year) = if v.len() == 8 && all_digits(v) {
        (&v[0..2], &v[2..4], &v[4..8])
    } else {
        let parts: Vec<&str> = v.split('/').collect();
        match parts.as_slice() {
            [d, m, y] if (1..=2).contains(&d.len()) && (1..=2).contains(&m.len()) && y.len() == 4 => {
                (*d, *m, *y)
            }
            _ => return None,
        }
    };

    if !(all_digits(day) && all_digits(month) && all_digits(year)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::parse("Nam"), Sex::Male);
        assert_eq!(Sex::parse("1"), Sex::Male);
        assert_eq!(Sex::parse("MALE"), Sex::Male);
        assert_eq!(Sex::parse("Nữ"), Sex::Female);
        assert_eq!(Sex::parse("nu"), Sex::Female);
        assert_eq!(Sex::parse("0"), Sex::Female);
        assert_eq!(Sex::parse("female"), Sex::Female);
        assert_eq!(Sex::parse("x"), Sex::Unknown);
        assert_eq!(Sex::parse(""), Sex::Unknown);
    }

    #[test]
    fn test_birth_date_shapes() {
        let d = NaiveDate::from_ymd_opt(1990, 1, 1);
        assert_eq!(parse_birth_date("01011990"), d);
        assert_eq!(parse_birth_date("1/1/1990"), d);
        assert_eq!(parse_birth_date("01/01/1990"), d);
        assert_eq!(parse_birth_date("1990-01-01"), None);
        assert_eq!(parse_birth_date("31021990"), None);
        assert_eq!(parse_birth_date("1/1/90"), None);
        assert_eq!(parse_birth_date("a/1/1990"), None);
    }
}
