use crate::{
    reminders::send_reminders::{ReminderRunTrigger, SendRemindersUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use cuthub_infra::CutHubContext;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;

/// Ticks missed while a slow run was in progress are skipped
fn job_interval(interval_secs: u64) -> Interval {
    let mut job_interval = interval(Duration::from_secs(interval_secs));
    job_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    job_interval
}

pub fn secs_to_next_minute(now_ts: i64) -> u64 {
    (60 - (now_ts / 1000).rem_euclid(60)) as u64
}

/// Runs the reminders job periodically when the server is configured to do so.
/// Overlapping with cron triggered runs is fine as every reminder is claimed
/// before it is sent.
pub fn start_send_reminders_job(ctx: CutHubContext) {
    let interval_secs = match ctx.config.reminders_job_interval_secs {
        Some(secs) => secs,
        None => return,
    };
    info!(
        "Starting the reminders job scheduler with an interval of {} seconds",
        interval_secs
    );

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let start = Instant::now() + Duration::from_secs(secs_to_next_minute(now));

        sleep_until(start).await;
        let mut runs = job_interval(interval_secs);
        loop {
            runs.tick().await;

            let usecase = SendRemindersUseCase {
                trigger: ReminderRunTrigger::JobScheduler,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}
