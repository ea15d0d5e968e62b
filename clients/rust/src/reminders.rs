use crate::{APIResponse, BaseClient};
use cuthub_api_structs::send_reminders;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct RemindersClient {
    base: Arc<BaseClient>,
}

impl RemindersClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a reminders run, the same way the cron scheduler does
    pub async fn send(&self, secret: &str) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .get(
                "cron/send-reminders".into(),
                &[("secret", secret)],
                StatusCode::OK,
            )
            .await
    }
}
