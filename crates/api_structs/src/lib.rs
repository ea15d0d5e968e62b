mod reminders;
mod shared;
mod status;

pub mod dtos {
    pub use crate::reminders::dtos::*;
}

pub use crate::reminders::api::*;
pub use crate::shared::ErrorResponse;
pub use crate::status::api::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cuthub_domain::{ReminderError, ReminderKind, ReminderRunSummary, ID};

    #[test]
    fn send_reminders_response_format() {
        let appointment_id = ID::new();
        let summary = ReminderRunSummary {
            reminders_24h: 2,
            reminders_60min: 1,
            skipped_without_email: 3,
            already_sent: 0,
            errors: vec![ReminderError {
                kind: ReminderKind::HourBefore,
                appointment_id: appointment_id.clone(),
                message: "Delivery failed".into(),
            }],
        };
        let timestamp = Utc.with_ymd_and_hms(2025, 3, 14, 10, 20, 0).unwrap();
        let res = send_reminders::APIResponse::new(summary, timestamp);
        let json = serde_json::to_value(&res).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "timestamp": "2025-03-14T10:20:00Z",
                "emailsSent": {
                    "reminders24h": 2,
                    "reminders60min": 1,
                    "errors": [{
                        "type": "60min",
                        "appointmentId": appointment_id.as_string(),
                        "error": "Delivery failed",
                    }],
                },
                "message": "Sent 2 24h reminders and 1 60min reminders",
            })
        );
    }

    #[test]
    fn error_response_omits_missing_details() {
        let json = serde_json::to_value(ErrorResponse {
            error: "Unauthorized".into(),
            details: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
    }
}
