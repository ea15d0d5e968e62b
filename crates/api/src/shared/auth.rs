use crate::error::CutHubError;
use cuthub_infra::CutHubContext;
use cuthub_utils::secrets_match;

/// Only the scheduler that knows the cron secret may trigger jobs
pub fn protect_cron_route(secret: Option<&str>, ctx: &CutHubContext) -> Result<(), CutHubError> {
    match secret {
        Some(secret) if secrets_match(secret, &ctx.config.cron_secret) => Ok(()),
        Some(_) => Err(CutHubError::Unauthorized("Invalid cron secret".into())),
        None => Err(CutHubError::Unauthorized(
            "Missing the `secret` query parameter".into(),
        )),
    }
}
