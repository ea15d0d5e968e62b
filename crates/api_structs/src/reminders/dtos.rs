use cuthub_domain::{ReminderError, ReminderKind, ReminderRunSummary, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderErrorDTO {
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub appointment_id: ID,
    pub error: String,
}

impl ReminderErrorDTO {
    pub fn new(error: ReminderError) -> Self {
        Self {
            kind: error.kind,
            appointment_id: error.appointment_id,
            error: error.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailsSentDTO {
    pub reminders_24h: usize,
    pub reminders_60min: usize,
    pub errors: Vec<ReminderErrorDTO>,
}

impl EmailsSentDTO {
    pub fn new(summary: ReminderRunSummary) -> Self {
        Self {
            reminders_24h: summary.reminders_24h,
            reminders_60min: summary.reminders_60min,
            errors: summary
                .errors
                .into_iter()
                .map(ReminderErrorDTO::new)
                .collect(),
        }
    }
}
