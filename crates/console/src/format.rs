//! Value formatting for detail views.

use chrono::{DateTime, Local, Utc};

pub const NOT_AVAILABLE: &str = "Not Available";

pub fn timestamp(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn date(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn optional_timestamp(value: Option<&DateTime<Utc>>) -> String {
    value.map(timestamp).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn optional_text(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_not_available() {
        assert_eq!(optional_timestamp(None), NOT_AVAILABLE);
        assert_eq!(optional_text(None), NOT_AVAILABLE);
        assert_eq!(optional_text(Some("  ")), NOT_AVAILABLE);
        assert_eq!(optional_text(Some("https://qr.example/GP-1")), "https://qr.example/GP-1");
    }
}
