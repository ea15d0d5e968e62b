use crate::{appointment::Appointment, reminder::ReminderKind};
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

/// Decides how far past the target minute the 60 minute window reaches.
///
/// The batch job runs periodically, so the window needs some tolerance to
/// not miss appointments between two runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUpperBound {
    /// Up to and including the last minute of the target clock hour
    EndOfHour,
    /// Up to and including the given amount of minutes after the target minute
    Minutes(u32),
}

impl Default for WindowUpperBound {
    fn default() -> Self {
        Self::EndOfHour
    }
}

/// Inclusive range of times of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn contains(&self, time: &NaiveTime) -> bool {
        self.start <= *time && *time <= self.end
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}

/// The set of appointments a `ReminderKind` is due for at a given instant
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderWindow {
    pub kind: ReminderKind,
    /// Appointment date, in the shops timezone
    pub date: NaiveDate,
    /// Appointment time of day, `None` means the whole day
    pub time_range: Option<TimeRange>,
}

impl ReminderWindow {
    pub fn new(kind: ReminderKind, now: DateTime<Utc>, tz: &Tz, upper: WindowUpperBound) -> Self {
        match kind {
            ReminderKind::DayBefore => Self::day_before(now, tz),
            ReminderKind::HourBefore => Self::hour_before(now, tz, upper),
        }
    }

    /// Every appointment on the date that is 24 hours from now
    pub fn day_before(now: DateTime<Utc>, tz: &Tz) -> Self {
        let target = (now + ReminderKind::DayBefore.lead_time()).with_timezone(tz);
        Self {
            kind: ReminderKind::DayBefore,
            date: target.date_naive(),
            time_range: None,
        }
    }

    /// Appointments starting from the minute that is 60 minutes from now and up to
    /// the `WindowUpperBound`. The range never extends into the next day.
    pub fn hour_before(now: DateTime<Utc>, tz: &Tz, upper: WindowUpperBound) -> Self {
        let target = (now + ReminderKind::HourBefore.lead_time()).with_timezone(tz);
        let start = NaiveTime::from_hms_opt(target.hour(), target.minute(), 0).unwrap_or_default();
        let end = match upper {
            WindowUpperBound::EndOfHour => {
                NaiveTime::from_hms_opt(target.hour(), 59, 59).unwrap_or_else(end_of_day)
            }
            WindowUpperBound::Minutes(minutes) => {
                let (end, wrapped_secs) =
                    start.overflowing_add_signed(chrono::Duration::minutes(minutes as i64));
                if wrapped_secs != 0 {
                    end_of_day()
                } else {
                    end
                }
            }
        };

        Self {
            kind: ReminderKind::HourBefore,
            date: target.date_naive(),
            time_range: Some(TimeRange { start, end }),
        }
    }

    /// Whether the `Appointment` should receive this reminder
    pub fn contains(&self, appointment: &Appointment) -> bool {
        appointment.date == self.date
            && appointment.status.awaits_reminders()
            && !appointment.reminder(self.kind).sent
            && self
                .time_range
                .map(|range| range.contains(&appointment.time))
                .unwrap_or(true)
    }
}
