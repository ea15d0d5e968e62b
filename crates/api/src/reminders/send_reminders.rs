use super::dispatch::dispatch_reminders;
use crate::{
    error::CutHubError,
    shared::{
        auth::protect_cron_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use cuthub_api_structs::send_reminders::{APIResponse, QueryParams};
use cuthub_domain::{ReminderKind, ReminderRunSummary, ReminderWindow};
use cuthub_infra::CutHubContext;
use tracing::info;

pub async fn send_reminders_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<CutHubContext>,
) -> Result<HttpResponse, CutHubError> {
    protect_cron_route(query.secret.as_deref(), &ctx)?;

    let usecase = SendRemindersUseCase {
        trigger: ReminderRunTrigger::Cron,
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary, ctx.sys.now())))
        .map_err(CutHubError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for CutHubError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(e) => Self::ReminderRunFailed(format!("{:#}", e)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderRunTrigger {
    /// An external scheduler called the cron route
    Cron,
    /// The in-process job scheduler
    JobScheduler,
}

/// Sends every reminder that is due right now: first the day before
/// reminders, then the hour before reminders.
#[derive(Debug)]
pub struct SendRemindersUseCase {
    pub trigger: ReminderRunTrigger,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = ReminderRunSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &CutHubContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let mut summary = ReminderRunSummary::default();

        for kind in [ReminderKind::DayBefore, ReminderKind::HourBefore] {
            let window = ReminderWindow::new(
                kind,
                now,
                &ctx.config.timezone,
                ctx.config.hour_reminder_upper_bound,
            );
            let appointments = ctx
                .repos
                .appointments
                .find_due_for_reminder(&window)
                .await
                .map_err(|e| {
                    UseCaseError::StorageError(
                        e.context(format!("Unable to find appointments due for the {} reminder", kind)),
                    )
                })?;
            info!(
                "Found {} appointments due for the {} reminder on {}",
                appointments.len(),
                kind,
                window.date
            );

            dispatch_reminders(kind, &appointments, ctx, &mut summary).await;
        }

        info!(
            "Reminders run ({:?}) finished: {} 24h sent, {} 60min sent, {} without email, {} already sent, {} errors",
            self.trigger,
            summary.reminders_24h,
            summary.reminders_60min,
            summary.skipped_without_email,
            summary.already_sent,
            summary.errors.len()
        );

        Ok(summary)
    }
}
