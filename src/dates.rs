//! Conversion between the backend's date representation and local dates.
//!
//! The backend stores calendar dates (`publicationDate`, `birthDate`) and
//! usually sends them as `YYYY-MM-DD`, but some endpoints send a full
//! timestamp such as `2020-01-15T00:00:00Z`. [`to_local`] accepts both and
//! yields a [`NaiveDate`]; [`to_server`] always writes `YYYY-MM-DD`.
//!
//! A timestamp is reduced to the calendar date in the offset it was written
//! with, so `2020-01-15T23:30:00-05:00` is the 15th, not the 16th.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Wire format for dates sent to the backend.
pub const SERVER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while normalizing date fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The value is not a recognizable date or timestamp.
    #[error("Invalid date '{value}'. Expected 'YYYY-MM-DD' or an RFC 3339 timestamp.")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },

    /// The field holds something other than a string or null.
    #[error("Date field '{field}' must be a string or null, got {found}")]
    NotAString {
        /// The JSON field name.
        field: String,
        /// The JSON type that was found instead.
        found: &'static str,
    },
}

/// Converts a server date or timestamp into a local calendar date.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the value cannot be parsed.
///
/// # Example
///
/// ```rust
/// use bookstore_client::dates::to_local;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
/// assert_eq!(to_local("2020-01-15").unwrap(), expected);
/// assert_eq!(to_local("2020-01-15T00:00:00Z").unwrap(), expected);
/// ```
pub fn to_local(server_date: &str) -> Result<NaiveDate, DateError> {
    let value = server_date.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, SERVER_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(DateError::InvalidDate {
        value: server_date.to_string(),
    })
}

/// Converts a local calendar date into the server's wire format.
///
/// ```rust
/// use bookstore_client::dates::to_server;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(1965, 8, 1).unwrap();
/// assert_eq!(to_server(date), "1965-08-01");
/// ```
#[must_use]
pub fn to_server(local_date: NaiveDate) -> String {
    local_date.format(SERVER_DATE_FORMAT).to_string()
}

/// Rewrites `field` of a JSON object from the server form to a local date.
///
/// Missing fields and `null` are left alone. Non-object values are ignored.
///
/// # Errors
///
/// Returns [`DateError`] if the field holds an unparseable date or a non-string.
pub fn localize_field(record: &mut Value, field: &str) -> Result<(), DateError> {
    rewrite_field(record, field, |raw| to_local(raw).map(to_server))
}

/// Rewrites `field` of a JSON object from a local date to the server form.
///
/// # Errors
///
/// Returns [`DateError`] if the field holds an unparseable date or a non-string.
pub fn serverize_field(record: &mut Value, field: &str) -> Result<(), DateError> {
    rewrite_field(record, field, |raw| {
        NaiveDate::parse_from_str(raw.trim(), SERVER_DATE_FORMAT)
            .or_else(|_| to_local(raw))
            .map(to_server)
            .map_err(|_| DateError::InvalidDate {
                value: raw.to_string(),
            })
    })
}

fn rewrite_field<F>(record: &mut Value, field: &str, convert: F) -> Result<(), DateError>
where
    F: FnOnce(&str) -> Result<String, DateError>,
{
    let Some(slot) = record.as_object_mut().and_then(|map| map.get_mut(field)) else {
        return Ok(());
    };

    let converted = match &*slot {
        Value::Null => return Ok(()),
        Value::String(raw) => convert(raw)?,
        other => {
            return Err(DateError::NotAString {
                field: field.to_string(),
                found: json_type_name(other),
            })
        }
    };

    *slot = Value::String(converted);
    Ok(())
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
