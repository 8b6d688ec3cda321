//! Project bookings (domain checkouts).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One assignment of a domain to a client project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    /// Set at checkout, never changed afterwards
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub client: String,
    pub domain_name: String,
    pub operator: Option<String>,
    pub project_type: String,
    pub activity_type: String,
    pub note: Option<String>,
    pub slack_channel: Option<String>,
}

impl BookingRecord {
    /// A booking still holds its domain while its end date is today or later.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }

    /// End date strictly in the past.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

/// Checkout request submitted by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub client: String,
    pub end_date: NaiveDate,
    pub operator: String,
    pub project_type: String,
    pub activity_type: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub slack_channel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(end: NaiveDate) -> BookingRecord {
        BookingRecord {
            id: "b-1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: end,
            client: "ACME".to_string(),
            domain_name: "example.com".to_string(),
            operator: Some("alice".to_string()),
            project_type: "Red Team".to_string(),
            activity_type: "Command and Control".to_string(),
            note: None,
            slack_channel: None,
        }
    }

    #[test]
    fn booking_ending_today_is_still_active() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let b = booking(today);
        assert!(b.is_active(today));
        assert!(!b.is_overdue(today));
    }

    #[test]
    fn booking_ending_yesterday_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let b = booking(today.pred_opt().unwrap());
        assert!(!b.is_active(today));
        assert!(b.is_overdue(today));
    }
}
