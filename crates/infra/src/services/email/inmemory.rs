use super::IReminderNotifier;
use anyhow::bail;
use cuthub_domain::{ReminderKind, ReminderPayload};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct SentReminder {
    pub kind: ReminderKind,
    pub to: String,
    pub payload: ReminderPayload,
}

/// Keeps the reminders instead of delivering them. Used for testing.
pub struct InMemoryReminderNotifier {
    sent: Mutex<Vec<SentReminder>>,
    failing_recipients: Mutex<Vec<String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl InMemoryReminderNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(vec![]),
        }
    }

    pub fn sent(&self) -> Vec<SentReminder> {
        lock(&self.sent).clone()
    }

    /// Every following send to this address will fail
    pub fn fail_for(&self, to: impl Into<String>) {
        lock(&self.failing_recipients).push(to.into());
    }

    fn record(&self, kind: ReminderKind, to: &str, payload: &ReminderPayload) -> anyhow::Result<()> {
        if lock(&self.failing_recipients).iter().any(|r| r == to) {
            bail!("Delivery to {} was rejected", to);
        }
        lock(&self.sent).push(SentReminder {
            kind,
            to: to.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

impl Default for InMemoryReminderNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for InMemoryReminderNotifier {
    async fn send_reminder_24h(&self, to: &str, payload: &ReminderPayload) -> anyhow::Result<()> {
        self.record(ReminderKind::DayBefore, to, payload)
    }

    async fn send_reminder_60min(
        &self,
        to: &str,
        payload: &ReminderPayload,
    ) -> anyhow::Result<()> {
        self.record(ReminderKind::HourBefore, to, payload)
    }
}
