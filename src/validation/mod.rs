//! Per-entity validators run before anything reaches the store.
//!
//! Request payloads are deserialized with every field optional so that a
//! missing field, an out-of-range number and an unknown enumeration value all
//! surface as the same [`AppError::Validation`] with every offending field listed.

pub mod engineer;
pub mod project;
pub mod report;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug)]
pub struct Violations {
    entity: &'static str,
    errors: Vec<String>,
}

impl Violations {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    pub fn add(&mut self, field: &str, reason: impl AsRef<str>) {
        self.errors.push(format!("{}: {}", field, reason.as_ref()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, "is required");
        }
        value
    }

    /// Trims the value; blank strings count as missing.
    pub fn required_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let trimmed = value
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self.required(field, trimmed)
    }

    pub fn one_of<T>(&mut self, field: &str, value: Option<String>) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        match value?.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.add(field, reason);
                None
            }
        }
    }

    pub fn id(&mut self, field: &str, value: Option<String>) -> Option<Uuid> {
        let raw = self.required_text(field, value)?;
        match Uuid::parse_str(&raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.add(field, format!("`{}` is not a valid id", raw));
                None
            }
        }
    }

    pub fn date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        let raw = self.required_text(field, value)?;
        match parse_date(&raw) {
            Some(date) => Some(date),
            None => {
                self.add(field, format!("`{}` is not a valid date", raw));
                None
            }
        }
    }

    pub fn timestamp(&mut self, field: &str, value: Option<String>) -> Option<NaiveDateTime> {
        let raw = value.map(|text| text.trim().to_string()).filter(|text| !text.is_empty())?;
        match parse_timestamp(&raw) {
            Some(timestamp) => Some(timestamp),
            None => {
                self.add(field, format!("`{}` is not a valid date", raw));
                None
            }
        }
    }

    /// JSON numbers arrive as `f64`; `50.0` is accepted as 50, `50.5` is not.
    pub fn whole_number(&mut self, field: &str, value: f64) -> Option<i64> {
        if value.is_finite() && value.fract() == 0.0 {
            Some(value as i64)
        } else {
            self.add(field, format!("{} is not a whole number", value));
            None
        }
    }

    pub fn percentage(&mut self, field: &str, value: i64) -> Option<i32> {
        if (0..=100).contains(&value) {
            Some(value as i32)
        } else {
            self.add(field, format!("{} is outside 0..=100", value));
            None
        }
    }

    /// Builds the validated value, or fails listing every violation collected so far.
    pub fn finish_with<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, AppError> {
        if self.errors.is_empty() {
            if let Some(value) = build() {
                return Ok(value);
            }
        }
        Err(self.into_error())
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(format!(
            "{} validation failed: {}",
            self.entity,
            self.errors.join(", ")
        ))
    }
}

/// For patch fields that `null` clears: absent is `None`, `null` is `Some(None)`.
/// Use with `#[serde(default, deserialize_with = "clearable")]`.
pub fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accepts `YYYY-MM-DD` or a full timestamp, keeping only the date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(raw).map(|timestamp| timestamp.date()))
}

/// Accepts RFC 3339 (normalised to UTC), a naive ISO timestamp, or a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return Some(timestamp);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
