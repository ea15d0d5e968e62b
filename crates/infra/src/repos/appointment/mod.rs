mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
use cuthub_domain::{Appointment, ReminderKind, ReminderWindow, ID};
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>>;
    /// Appointments inside the `ReminderWindow` that have not received its reminder yet
    async fn find_due_for_reminder(
        &self,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Marks the reminder as sent, but only if it was not already marked.
    /// Returns `false` when some other run got there first.
    async fn claim_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    /// Reverts a claim made at `claimed_at` whose reminder could not be delivered
    async fn release_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use cuthub_domain::{AppointmentStatus, ReminderFlag, Tz, WindowUpperBound};
    use std::sync::Arc;

    fn appointment_on(date: NaiveDate, hour: u32) -> Appointment {
        appointment_at(date, hour, 0)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn finds_only_appointments_due_in_window() {
        let repo = InMemoryAppointmentRepo::new();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let due = appointment_on(tomorrow, 9);
        let mut reminded = appointment_on(tomorrow, 10);
        reminded.reminder_24h = ReminderFlag::sent_at(now());
        let other_day = appointment_on(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(), 9);
        for a in [&due, &reminded, &other_day] {
            repo.insert(a).await.unwrap();
        }

        let window = ReminderWindow::day_before(now(), &Tz::UTC);
        let found = repo.find_due_for_reminder(&window).await.unwrap();
        assert_eq!(found, vec![due]);
    }

    #[tokio::test]
    async fn claims_reminder_only_once() {
        let repo = InMemoryAppointmentRepo::new();
        let appointment = appointment_on(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), 9);
        repo.insert(&appointment).await.unwrap();

        assert!(repo
            .claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap());
        assert!(!repo
            .claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap());
        // Independent of the other kind
        assert!(repo
            .claim_reminder(&appointment.id, ReminderKind::HourBefore, now())
            .await
            .unwrap());
        // Unknown appointment can not be claimed
        assert!(!repo
            .claim_reminder(&ID::new(), ReminderKind::DayBefore, now())
            .await
            .unwrap());

        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_24h, ReminderFlag::sent_at(now()));
        assert_eq!(stored.reminder_60min, ReminderFlag::sent_at(now()));
    }

    #[tokio::test]
    async fn releases_only_own_claim() {
        let repo = InMemoryAppointmentRepo::new();
        let appointment = appointment_on(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), 9);
        repo.insert(&appointment).await.unwrap();

        repo.claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap();
        let other_claim = now() + chrono::Duration::seconds(1);
        repo.release_reminder(&appointment.id, ReminderKind::DayBefore, other_claim)
            .await
            .unwrap();
        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert!(stored.reminder_24h.sent);

        repo.release_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap();
        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_24h, ReminderFlag::default());
    }

    // The tests below run against the database at `DATABASE_URL`:
    // cargo test -p cuthub_infra -- --ignored
    async fn postgres_repo() -> Arc<dyn IAppointmentRepo> {
        crate::setup_context()
            .await
            .expect("To connect to the database at DATABASE_URL")
            .repos
            .appointments
    }

    fn appointment_at(date: NaiveDate, hour: u32, minute: u32) -> Appointment {
        Appointment::new(
            ID::new(),
            ID::new(),
            ID::new(),
            date,
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        )
    }

    #[tokio::test]
    #[ignore = "needs a postgres database at DATABASE_URL"]
    async fn postgres_claims_reminder_only_once() {
        let repo = postgres_repo().await;
        let appointment = appointment_on(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), 9);
        repo.insert(&appointment).await.unwrap();

        assert!(repo
            .claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap());
        assert!(!repo
            .claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap());
        assert!(repo
            .claim_reminder(&appointment.id, ReminderKind::HourBefore, now())
            .await
            .unwrap());
        assert!(!repo
            .claim_reminder(&ID::new(), ReminderKind::DayBefore, now())
            .await
            .unwrap());

        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_24h, ReminderFlag::sent_at(now()));
        assert_eq!(stored.reminder_60min, ReminderFlag::sent_at(now()));
    }

    #[tokio::test]
    #[ignore = "needs a postgres database at DATABASE_URL"]
    async fn postgres_releases_only_own_claim() {
        let repo = postgres_repo().await;
        let appointment = appointment_on(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), 9);
        repo.insert(&appointment).await.unwrap();

        repo.claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap();
        let other_claim = now() + chrono::Duration::seconds(1);
        repo.release_reminder(&appointment.id, ReminderKind::DayBefore, other_claim)
            .await
            .unwrap();
        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_24h, ReminderFlag::sent_at(now()));

        repo.release_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap();
        let stored = repo.find(&appointment.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_24h, ReminderFlag::default());

        // Released reminders can be claimed again
        assert!(repo
            .claim_reminder(&appointment.id, ReminderKind::DayBefore, now())
            .await
            .unwrap());
    }

    #[tokio::test]
    #[ignore = "needs a postgres database at DATABASE_URL"]
    async fn postgres_finds_only_appointments_due_in_window() {
        let repo = postgres_repo().await;
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        // 60 minutes from 10:00 with 10 minutes of tolerance: 11:00 up to 11:10
        let window = ReminderWindow::hour_before(now(), &Tz::UTC, WindowUpperBound::Minutes(10));

        let at_start = appointment_at(today, 11, 0);
        let at_end = appointment_at(today, 11, 10);
        let mut accepted = appointment_at(today, 11, 5);
        accepted.status = AppointmentStatus::Accepted;
        let due = [&at_start, &at_end, &accepted];

        let before_start = appointment_at(today, 10, 59);
        let after_end = appointment_at(today, 11, 11);
        let other_day = appointment_at(tomorrow, 11, 5);
        let mut cancelled = appointment_at(today, 11, 5);
        cancelled.status = AppointmentStatus::Cancelled;
        let mut completed = appointment_at(today, 11, 5);
        completed.status = AppointmentStatus::Completed;
        let mut reminded = appointment_at(today, 11, 5);
        reminded.reminder_60min = ReminderFlag::sent_at(now());
        let not_due = [
            &before_start,
            &after_end,
            &other_day,
            &cancelled,
            &completed,
            &reminded,
        ];

        for a in due.iter().chain(not_due.iter()) {
            repo.insert(a).await.unwrap();
        }

        // Other tests share the database, only look at what this test inserted
        let found = repo.find_due_for_reminder(&window).await.unwrap();
        for a in due {
            assert!(found.iter().any(|f| f.id == a.id), "{:?} to be due", a.time);
        }
        for a in not_due {
            assert!(!found.iter().any(|f| f.id == a.id), "{:?} not to be due", a.id);
        }

        let day_before = ReminderWindow::day_before(now(), &Tz::UTC);
        let found = repo.find_due_for_reminder(&day_before).await.unwrap();
        assert!(found.iter().any(|f| f.id == other_day.id));
        assert!(!found.iter().any(|f| f.id == at_start.id));
    }
}
