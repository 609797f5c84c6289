//! Wallpaper record value object.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One dated wallpaper as supplied by the record producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(default)]
    description: String,
    #[serde(default)]
    date: String,
    #[serde(alias = "url", default)]
    remote_url: String,
}

impl ImageRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        date: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            date: date.into(),
            remote_url: remote_url.into(),
        }
    }

    /// Returns the human readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the date as supplied, possibly empty or malformed.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the remote image URL.
    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Returns true if the date starts with a `YYYY-MM` prefix.
    #[must_use]
    pub fn has_usable_date(&self) -> bool {
        is_year_month_prefix(&self.date)
    }

    /// Returns the date used for partitioning: the record's own date when it
    /// has a `YYYY-MM` prefix, today's local date otherwise.
    #[must_use]
    pub fn effective_date(&self) -> Cow<'_, str> {
        if self.has_usable_date() {
            Cow::Borrowed(&self.date)
        } else {
            Cow::Owned(today())
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Checks for a `YYYY-MM` prefix.
#[must_use]
pub fn is_year_month_prefix(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() >= 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_producer_format() {
        let json = r#"{"url": "https://cn.bing.com/th?id=OHR.A.jpg", "date": "2024-03-15", "description": "A"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.remote_url(), "https://cn.bing.com/th?id=OHR.A.jpg");
        assert_eq!(record.date(), "2024-03-15");
        assert_eq!(record.description(), "A");
    }

    #[test]
    fn test_deserialize_camel_case_and_missing_fields() {
        let json = r#"{"remoteUrl": "https://example.com/a.jpg"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.remote_url(), "https://example.com/a.jpg");
        assert!(record.date().is_empty());
        assert!(record.description().is_empty());
    }

    #[test]
    fn test_effective_date_keeps_valid_date() {
        let record = ImageRecord::new("", "2024-03-15", "https://x/y.jpg");
        assert!(record.has_usable_date());
        assert_eq!(record.effective_date(), "2024-03-15");
    }

    #[test]
    fn test_effective_date_substitutes_today() {
        for date in ["", "2024", "2024/03/15", "../../etc"] {
            let record = ImageRecord::new("", date, "https://x/y.jpg");
            assert!(!record.has_usable_date(), "{date}");
            assert!(is_year_month_prefix(&record.effective_date()));
        }
    }

    #[test]
    fn test_year_month_only_is_enough() {
        assert!(is_year_month_prefix("2024-03"));
        assert!(!is_year_month_prefix("2024-3"));
        assert!(!is_year_month_prefix("２０２４-03"));
    }
}
