use crate::{
    appointment::Appointment,
    service::Service,
    shared::entity::ID,
    shop::{Location, Shop},
    user::User,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DEFAULT_SERVICE_NAME: &str = "Serviço";
pub const DEFAULT_SHOP_NAME: &str = "CutHub";

/// The two reminders every upcoming `Appointment` receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderKind {
    #[serde(rename = "24h")]
    DayBefore,
    #[serde(rename = "60min")]
    HourBefore,
}

impl ReminderKind {
    /// How long before the appointment the reminder is due
    pub fn lead_time(&self) -> Duration {
        match self {
            Self::DayBefore => Duration::hours(24),
            Self::HourBefore => Duration::minutes(60),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DayBefore => "24h",
            Self::HourBefore => "60min",
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Records whether a `ReminderKind` has been sent for an `Appointment`.
/// It only ever goes from not sent to sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderFlag {
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ReminderFlag {
    pub fn sent_at(at: DateTime<Utc>) -> Self {
        Self {
            sent: true,
            sent_at: Some(at),
        }
    }
}

/// Everything the notifier needs to render a reminder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderPayload {
    pub client_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub service_name: String,
    pub professional_name: Option<String>,
    pub shop_name: String,
    pub address: Option<String>,
}

impl ReminderPayload {
    /// Referenced entities that could not be found render as defaults
    pub fn new(
        appointment: &Appointment,
        client: &User,
        service: Option<&Service>,
        professional: Option<&User>,
        shop: Option<&Shop>,
        location: Option<&Location>,
    ) -> Self {
        Self {
            client_name: client.name.clone(),
            date: appointment.date,
            time: appointment.time,
            service_name: service
                .map(|s| s.name.clone())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            professional_name: professional.map(|p| p.name.clone()),
            shop_name: shop
                .map(|s| s.name.clone())
                .unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            address: location.and_then(|l| l.address.clone()),
        }
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn formatted_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// A reminder that could not be delivered during a batch run. Contains
/// enough context to replay the send manually.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderError {
    pub kind: ReminderKind,
    pub appointment_id: ID,
    pub message: String,
}

/// Aggregate result of one batch run over both reminder windows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderRunSummary {
    pub reminders_24h: usize,
    pub reminders_60min: usize,
    /// Candidates skipped because the client has no email address
    pub skipped_without_email: usize,
    /// Candidates another run claimed first
    pub already_sent: usize,
    pub errors: Vec<ReminderError>,
}

impl ReminderRunSummary {
    pub fn record_sent(&mut self, kind: ReminderKind) {
        match kind {
            ReminderKind::DayBefore => self.reminders_24h += 1,
            ReminderKind::HourBefore => self.reminders_60min += 1,
        }
    }

    pub fn sent(&self, kind: ReminderKind) -> usize {
        match kind {
            ReminderKind::DayBefore => self.reminders_24h,
            ReminderKind::HourBefore => self.reminders_60min,
        }
    }
}
