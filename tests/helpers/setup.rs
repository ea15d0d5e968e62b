use chrono::{DateTime, TimeZone, Utc};
use cuthub_api::Application;
use cuthub_domain::{Tz, WindowUpperBound};
use cuthub_infra::{CutHubContext, ISys, InMemoryReminderNotifier};
use cuthub_sdk::CutHubSDK;
use std::sync::Arc;

pub const CRON_SECRET: &str = "integration-cron-secret";

/// Fri Mar 14 2025 10:20:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 10, 20, 0).unwrap()
}

struct StaticTimeSys;
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        now().timestamp_millis()
    }
}

pub struct TestApp {
    pub ctx: CutHubContext,
    pub notifier: Arc<InMemoryReminderNotifier>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, CutHubSDK, String) {
    let mut ctx = CutHubContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.cron_secret = CRON_SECRET.into();
    ctx.config.timezone = Tz::UTC;
    ctx.config.hour_reminder_upper_bound = WindowUpperBound::EndOfHour;
    ctx.config.reminders_job_interval_secs = None;
    ctx.sys = Arc::new(StaticTimeSys);
    let notifier = Arc::new(InMemoryReminderNotifier::new());
    ctx.notifier = notifier.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx, notifier };
    let sdk = CutHubSDK::new(address.clone());
    (app, sdk, address)
}
