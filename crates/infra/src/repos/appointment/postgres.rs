use super::IAppointmentRepo;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use cuthub_domain::{Appointment, AppointmentStatus, ReminderFlag, ReminderKind, ReminderWindow, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    client_uid: Uuid,
    service_uid: Uuid,
    shop_uid: Uuid,
    professional_uid: Option<Uuid>,
    location_uid: Option<Uuid>,
    start_date: NaiveDate,
    start_time: NaiveTime,
    status: String,
    reminder_24h_sent: bool,
    reminder_24h_sent_at: Option<DateTime<Utc>>,
    reminder_60min_sent: bool,
    reminder_60min_sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<AppointmentRaw> for Appointment {
    type Error = anyhow::Error;

    fn try_from(raw: AppointmentRaw) -> Result<Self, Self::Error> {
        let status = raw
            .status
            .parse()
            .with_context(|| format!("Appointment {} has an invalid status", raw.appointment_uid))?;
        Ok(Self {
            id: raw.appointment_uid.into(),
            client_id: raw.client_uid.into(),
            service_id: raw.service_uid.into(),
            shop_id: raw.shop_uid.into(),
            professional_id: raw.professional_uid.map(|id| id.into()),
            location_id: raw.location_uid.map(|id| id.into()),
            date: raw.start_date,
            time: raw.start_time,
            status,
            reminder_24h: ReminderFlag {
                sent: raw.reminder_24h_sent,
                sent_at: raw.reminder_24h_sent_at,
            },
            reminder_60min: ReminderFlag {
                sent: raw.reminder_60min_sent,
                sent_at: raw.reminder_60min_sent_at,
            },
        })
    }
}

/// The `sent` and `sent_at` columns of a reminder kind
fn reminder_columns(kind: ReminderKind) -> (&'static str, &'static str) {
    match kind {
        ReminderKind::DayBefore => ("reminder_24h_sent", "reminder_24h_sent_at"),
        ReminderKind::HourBefore => ("reminder_60min_sent", "reminder_60min_sent_at"),
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
            (appointment_uid, client_uid, service_uid, shop_uid, professional_uid, location_uid,
                start_date, start_time, status,
                reminder_24h_sent, reminder_24h_sent_at, reminder_60min_sent, reminder_60min_sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.client_id.inner_ref())
        .bind(appointment.service_id.inner_ref())
        .bind(appointment.shop_id.inner_ref())
        .bind(appointment.professional_id.as_ref().map(|id| *id.inner_ref()))
        .bind(appointment.location_id.as_ref().map(|id| *id.inner_ref()))
        .bind(appointment.date)
        .bind(appointment.time)
        .bind(appointment.status.as_str())
        .bind(appointment.reminder_24h.sent)
        .bind(appointment.reminder_24h.sent_at)
        .bind(appointment.reminder_60min.sent)
        .bind(appointment.reminder_60min.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        appointment.map(Appointment::try_from).transpose()
    }

    async fn find_due_for_reminder(
        &self,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<Appointment>> {
        let (sent_column, _) = reminder_columns(window.kind);
        let statuses = AppointmentStatus::reminder_eligible()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>();
        let (range_start, range_end) = match window.time_range {
            Some(range) => (Some(range.start), Some(range.end)),
            None => (None, None),
        };

        let appointments = sqlx::query_as::<_, AppointmentRaw>(&format!(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.start_date = $1 AND
            a.status = ANY($2) AND
            a.{} = false AND
            ($3::time IS NULL OR a.start_time BETWEEN $3 AND $4)
            "#,
            sent_column
        ))
        .bind(window.date)
        .bind(statuses)
        .bind(range_start)
        .bind(range_end)
        .fetch_all(&self.pool)
        .await?;

        appointments.into_iter().map(Appointment::try_from).collect()
    }

    async fn claim_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let (sent_column, sent_at_column) = reminder_columns(kind);
        let res = sqlx::query(&format!(
            r#"
            UPDATE appointments
            SET {sent} = true, {sent_at} = $2
            WHERE appointment_uid = $1 AND {sent} = false
            "#,
            sent = sent_column,
            sent_at = sent_at_column
        ))
        .bind(appointment_id.inner_ref())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let (sent_column, sent_at_column) = reminder_columns(kind);
        sqlx::query(&format!(
            r#"
            UPDATE appointments
            SET {sent} = false, {sent_at} = NULL
            WHERE appointment_uid = $1 AND {sent} = true AND {sent_at} = $2
            "#,
            sent = sent_column,
            sent_at = sent_at_column
        ))
        .bind(appointment_id.inner_ref())
        .bind(claimed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
