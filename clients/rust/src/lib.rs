mod base;
mod reminders;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use cuthub_api_structs::dtos::*;
pub use cuthub_api_structs::ErrorResponse;
use reminders::RemindersClient;
use status::StatusClient;
use std::sync::Arc;

/// CutHub Reminders SDK
///
/// The SDK contains methods for interacting with the CutHub reminders
/// server API.
#[derive(Clone)]
pub struct CutHubSDK {
    pub reminders: RemindersClient,
    pub status: StatusClient,
}

impl CutHubSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(address.into()));
        let reminders = RemindersClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminders, status }
    }
}
