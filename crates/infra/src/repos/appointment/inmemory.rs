use super::IAppointmentRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use cuthub_domain::{Appointment, ReminderFlag, ReminderKind, ReminderWindow, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        Ok(find(appointment_id, &self.appointments))
    }

    async fn find_due_for_reminder(
        &self,
        window: &ReminderWindow,
    ) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_by(&self.appointments, |a| window.contains(a)))
    }

    async fn claim_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        Ok(update_one(appointment_id, &self.appointments, |a| {
            let flag = a.reminder_mut(kind);
            if flag.sent {
                return false;
            }
            *flag = ReminderFlag::sent_at(at);
            true
        }))
    }

    async fn release_reminder(
        &self,
        appointment_id: &ID,
        kind: ReminderKind,
        claimed_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        update_one(appointment_id, &self.appointments, |a| {
            let flag = a.reminder_mut(kind);
            if flag.sent_at != Some(claimed_at) {
                return false;
            }
            *flag = ReminderFlag::default();
            true
        });
        Ok(())
    }
}
