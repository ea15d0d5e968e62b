use crate::dtos::EmailsSentDTO;
use chrono::{DateTime, Utc};
use cuthub_domain::ReminderRunSummary;
use serde::{Deserialize, Serialize};

pub mod send_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub secret: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub timestamp: DateTime<Utc>,
        pub emails_sent: EmailsSentDTO,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(summary: ReminderRunSummary, timestamp: DateTime<Utc>) -> Self {
            let message = format!(
                "Sent {} 24h reminders and {} 60min reminders",
                summary.reminders_24h, summary.reminders_60min
            );
            Self {
                success: true,
                timestamp,
                emails_sent: EmailsSentDTO::new(summary),
                message,
            }
        }
    }
}
