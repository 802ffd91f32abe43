// src/services/date_utils.rs
use crate::errors::DateFormatError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Turns an ISO-8601 timestamp into display text.
pub trait DateFormat {
    fn format(&self, iso_date: &str) -> Result<String, DateFormatError>;
}

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// chrono backed formatter, `"2023-01-15T00:00:00Z"` becomes `"Jan 15, 2023"`.
#[derive(Debug, Clone)]
pub struct DateUtils {
    pattern: String,
}

impl Default for DateUtils {
    fn default() -> Self {
        Self { pattern: DEFAULT_DATE_FORMAT.to_string() }
    }
}

impl DateUtils {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    fn parse(iso_date: &str) -> Option<NaiveDate> {
        let trimmed = iso_date.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
            .ok()
    }
}

impl DateFormat for DateUtils {
    fn format(&self, iso_date: &str) -> Result<String, DateFormatError> {
        let date = Self::parse(iso_date)
            .ok_or_else(|| DateFormatError::InvalidDate(iso_date.to_string()))?;
        Ok(date.format(&self.pattern).to_string())
    }
}
