mod email;

pub use email::{
    EmailContent, IReminderNotifier, InMemoryReminderNotifier, ResendReminderNotifier,
    SentReminder,
};
