use crate::{
    reminder::{ReminderFlag, ReminderKind},
    shared::entity::{Entity, ID},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Completed,
    Rejected,
    Cancelled,
}

impl AppointmentStatus {
    /// Only appointments that are still going to happen receive reminders
    pub fn awaits_reminders(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    pub fn reminder_eligible() -> [Self; 2] {
        [Self::Pending, Self::Accepted]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Appointment status: {0} is not recognized")]
    Unknown(String),
}

impl FromStr for AppointmentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidStatusError::Unknown(s.to_string())),
        }
    }
}

/// A booked service slot at a `Shop`.
///
/// The `date` and `time` are wall clock values in the timezone the shops
/// operate in, exactly as the client picked them when booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    /// The `User` who booked the appointment and receives the reminders
    pub client_id: ID,
    pub service_id: ID,
    pub shop_id: ID,
    /// The `User` performing the service, if one was chosen
    pub professional_id: Option<ID>,
    /// The shop `Location`, for shops with more than one address
    pub location_id: Option<ID>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub reminder_24h: ReminderFlag,
    pub reminder_60min: ReminderFlag,
}

impl Appointment {
    pub fn new(
        client_id: ID,
        service_id: ID,
        shop_id: ID,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            id: Default::default(),
            client_id,
            service_id,
            shop_id,
            professional_id: None,
            location_id: None,
            date,
            time,
            status: AppointmentStatus::Pending,
            reminder_24h: Default::default(),
            reminder_60min: Default::default(),
        }
    }

    pub fn reminder(&self, kind: ReminderKind) -> &ReminderFlag {
        match kind {
            ReminderKind::DayBefore => &self.reminder_24h,
            ReminderKind::HourBefore => &self.reminder_60min,
        }
    }

    pub fn reminder_mut(&mut self, kind: ReminderKind) -> &mut ReminderFlag {
        match kind {
            ReminderKind::DayBefore => &mut self.reminder_24h,
            ReminderKind::HourBefore => &mut self.reminder_60min,
        }
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}
