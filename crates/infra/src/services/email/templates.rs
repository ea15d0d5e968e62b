use anyhow::Context;
use askama::Template;
use cuthub_domain::ReminderPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

#[derive(Template)]
#[template(path = "reminder_24h.html")]
struct DayBeforeReminderTemplate<'a> {
    client_name: &'a str,
    date: String,
    time: String,
    service_name: &'a str,
    professional_name: Option<&'a str>,
    shop_name: &'a str,
}

#[derive(Template)]
#[template(path = "reminder_60min.html")]
struct HourBeforeReminderTemplate<'a> {
    client_name: &'a str,
    time: String,
    service_name: &'a str,
    professional_name: Option<&'a str>,
    shop_name: &'a str,
    address: Option<&'a str>,
}

pub fn day_before_reminder(payload: &ReminderPayload) -> anyhow::Result<EmailContent> {
    let html = DayBeforeReminderTemplate {
        client_name: &payload.client_name,
        date: payload.formatted_date(),
        time: payload.formatted_time(),
        service_name: &payload.service_name,
        professional_name: payload.professional_name.as_deref(),
        shop_name: &payload.shop_name,
    }
    .render()
    .context("Unable to render the 24h reminder")?;

    Ok(EmailContent {
        subject: format!("Lembrete: Marcação amanhã - {}", payload.shop_name),
        html,
    })
}

pub fn hour_before_reminder(payload: &ReminderPayload) -> anyhow::Result<EmailContent> {
    let html = HourBeforeReminderTemplate {
        client_name: &payload.client_name,
        time: payload.formatted_time(),
        service_name: &payload.service_name,
        professional_name: payload.professional_name.as_deref(),
        shop_name: &payload.shop_name,
        address: payload.address.as_deref(),
    }
    .render()
    .context("Unable to render the 60min reminder")?;

    Ok(EmailContent {
        subject: format!("⏰ Lembrete: Marcação em 1 hora - {}", payload.shop_name),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn payload() -> ReminderPayload {
        ReminderPayload {
            client_name: "Ana <script>".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            service_name: "Corte".into(),
            professional_name: None,
            shop_name: "Lisbon Barbers".into(),
            address: Some("Rua Augusta 1".into()),
        }
    }

    #[test]
    fn escapes_user_values() {
        let email = day_before_reminder(&payload()).unwrap();
        assert!(email.html.contains("Olá Ana &lt;script&gt;!"));
        assert!(!email.html.contains("<script>"));

        let mut payload = payload();
        payload.address = Some("<b>Rua</b>".into());
        let email = hour_before_reminder(&payload).unwrap();
        assert!(email.html.contains("&lt;b&gt;Rua"));
        assert!(!email.html.contains("<b>"));
        assert!(!email.html.contains("<script>"));
    }

    #[test]
    fn day_before_reminder_content() {
        let email = day_before_reminder(&payload()).unwrap();
        assert_eq!(email.subject, "Lembrete: Marcação amanhã - Lisbon Barbers");
        assert!(email.html.contains("2025-03-15"));
        assert!(email.html.contains("09:30"));
        assert!(email.html.contains("Corte"));
        assert!(!email.html.contains("Profissional"));
        // The address is only part of the last reminder
        assert!(!email.html.contains("Rua Augusta 1"));
    }

    #[test]
    fn hour_before_reminder_content() {
        let mut payload = payload();
        payload.professional_name = Some("Tiago".into());
        let email = hour_before_reminder(&payload).unwrap();
        assert_eq!(email.subject, "⏰ Lembrete: Marcação em 1 hora - Lisbon Barbers");
        assert!(email.html.contains("Tiago"));
        assert!(email.html.contains("Rua Augusta 1"));

        payload.address = None;
        assert!(!hour_before_reminder(&payload).unwrap().html.contains("Morada"));
    }
}
