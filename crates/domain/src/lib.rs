mod appointment;
mod reminder;
mod reminder_window;
mod service;
mod shared;
mod shop;
mod user;

pub use appointment::{Appointment, AppointmentStatus, InvalidStatusError};
pub use chrono_tz::Tz;
pub use reminder::{
    ReminderError, ReminderFlag, ReminderKind, ReminderPayload, ReminderRunSummary,
    DEFAULT_SERVICE_NAME, DEFAULT_SHOP_NAME,
};
pub use reminder_window::{ReminderWindow, TimeRange, WindowUpperBound};
pub use service::Service;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shop::{Location, Shop};
pub use user::User;
