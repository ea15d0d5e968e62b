use super::{
    templates::{day_before_reminder, hour_before_reminder, EmailContent},
    IReminderNotifier,
};
use crate::config::EmailConfig;
use anyhow::{anyhow, bail, Context};
use cuthub_domain::ReminderPayload;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends reminder emails through the Resend email api
pub struct ResendReminderNotifier {
    client: Client,
    api_url: Url,
    api_key: Option<String>,
    from: String,
}

impl ResendReminderNotifier {
    pub fn new(config: &EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        }
    }

    async fn send(&self, to: &str, email: EmailContent) -> anyhow::Result<()> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Email delivery is not configured, RESEND_API_KEY is missing"))?;
        let url = self.api_url.join("emails")?;

        let res = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [to],
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await
            .context("Unable to reach the email api")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            bail!("Email api responded with status {}: {}", status, body);
        }

        info!("Reminder email sent to: {}", to);
        Ok(())
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for ResendReminderNotifier {
    async fn send_reminder_24h(&self, to: &str, payload: &ReminderPayload) -> anyhow::Result<()> {
        self.send(to, day_before_reminder(payload)?).await
    }

    async fn send_reminder_60min(
        &self,
        to: &str,
        payload: &ReminderPayload,
    ) -> anyhow::Result<()> {
        self.send(to, hour_before_reminder(payload)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[tokio::test]
    async fn fails_without_api_key() {
        let notifier = ResendReminderNotifier::new(&EmailConfig {
            api_key: None,
            api_url: Url::parse("http://localhost:1/").unwrap(),
            from: "reminders@cuthub.pt".into(),
        });
        let payload = ReminderPayload {
            client_name: "Ana".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            service_name: "Corte".into(),
            professional_name: None,
            shop_name: "Lisbon Barbers".into(),
            address: None,
        };
        let err = notifier
            .send_reminder_24h("ana@example.com", &payload)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("RESEND_API_KEY"));
    }
}
