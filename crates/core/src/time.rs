//! Timestamp conventions.
//!
//! Every instant in the contracts layer is UTC; timezone-awareness is
//! carried by the type, so a naive local time cannot be smuggled in. The
//! wire form is an ISO-8601 UTC string (`"2024-01-01T00:00:00Z"`).

use chrono::{DateTime, Utc};

/// UTC-normalized instant used by every contract record.
pub type Timestamp = DateTime<Utc>;

/// Current UTC instant.
pub fn utc_now() -> Timestamp {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_iso_8601_utc() {
        let ts: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            serde_json::json!("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let ts: Timestamp = "2024-01-01T05:00:00+05:00".parse().unwrap();
        let midnight: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(ts, midnight);
    }
}
