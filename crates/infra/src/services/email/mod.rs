mod inmemory;
mod resend;
mod templates;

use cuthub_domain::ReminderPayload;
pub use inmemory::{InMemoryReminderNotifier, SentReminder};
pub use resend::ResendReminderNotifier;
pub use templates::EmailContent;

/// Delivers appointment reminders to clients
#[async_trait::async_trait]
pub trait IReminderNotifier: Send + Sync {
    async fn send_reminder_24h(&self, to: &str, payload: &ReminderPayload) -> anyhow::Result<()>;
    async fn send_reminder_60min(&self, to: &str, payload: &ReminderPayload)
        -> anyhow::Result<()>;
}
