use cuthub_domain::{Tz, WindowUpperBound};
use cuthub_utils::create_random_secret;
use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = Tz::Europe__Lisbon;
const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/";
const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Api key of the email delivery provider. Reminders can not be
    /// delivered without it.
    pub api_key: Option<String>,
    /// Base url of the email delivery api, always ending with a `/`
    pub api_url: Url,
    /// Sender address of the reminder emails
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret the cron trigger has to provide to run the reminders job
    pub cron_secret: String,
    /// Timezone the appointment dates and times are expressed in
    pub timezone: Tz,
    /// How far the 60 minute reminder window reaches past its target minute
    pub hour_reminder_upper_bound: WindowUpperBound,
    /// When set the server runs the reminders job itself with this interval
    pub reminders_job_interval_secs: Option<u64>,
    pub email: EmailConfig,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(port: Option<String>) -> usize {
    match port {
        None => DEFAULT_PORT,
        Some(port) => port.parse::<usize>().unwrap_or_else(|_| {
            warn!(
                "The given PORT: {} is not valid, falling back to the default port: {}.",
                port, DEFAULT_PORT
            );
            DEFAULT_PORT
        }),
    }
}

fn parse_timezone(timezone: Option<String>) -> Tz {
    match timezone {
        None => DEFAULT_TIMEZONE,
        Some(timezone) => timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "The given REMINDERS_TIMEZONE: {} is not valid, falling back to: {}.",
                timezone, DEFAULT_TIMEZONE
            );
            DEFAULT_TIMEZONE
        }),
    }
}

fn parse_upper_bound(minutes: Option<String>) -> WindowUpperBound {
    match minutes {
        None => WindowUpperBound::EndOfHour,
        Some(minutes) => match minutes.parse::<u32>() {
            Ok(minutes) => WindowUpperBound::Minutes(minutes),
            Err(_) => {
                warn!(
                    "The given REMINDER_60MIN_WINDOW_MINUTES: {} is not valid, falling back to the end of the hour.",
                    minutes
                );
                WindowUpperBound::EndOfHour
            }
        },
    }
}

fn parse_job_interval(secs: Option<String>) -> Option<u64> {
    let secs = secs?;
    match secs.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            warn!(
                "The given REMINDERS_JOB_INTERVAL_SECS: {} is not valid, the reminders job will only run when triggered.",
                secs
            );
            None
        }
    }
}

fn default_email_api_url() -> Url {
    Url::parse(DEFAULT_EMAIL_API_URL).expect("Default email api url to be valid")
}

fn parse_email_api_url(url: Option<String>) -> Url {
    let url = match url {
        None => return default_email_api_url(),
        Some(url) if url.ends_with('/') => url,
        Some(url) => format!("{}/", url),
    };
    Url::parse(&url).unwrap_or_else(|_| {
        warn!(
            "The given RESEND_API_URL: {} is not valid, falling back to: {}.",
            url, DEFAULT_EMAIL_API_URL
        );
        default_email_api_url()
    })
}

impl Config {
    pub fn new() -> Self {
        let cron_secret = match env_var("CRON_SECRET") {
            Some(secret) => secret,
            None => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for triggering the reminders job was generated and set to: {}", secret);
                secret
            }
        };

        let email = EmailConfig {
            api_key: env_var("RESEND_API_KEY"),
            api_url: parse_email_api_url(env_var("RESEND_API_URL")),
            from: env_var("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.into()),
        };
        if email.api_key.is_none() {
            warn!("Did not find RESEND_API_KEY environment variable. Reminder emails will fail to be delivered.");
        }

        Self {
            port: parse_port(env_var("PORT")),
            cron_secret,
            timezone: parse_timezone(env_var("REMINDERS_TIMEZONE")),
            hour_reminder_upper_bound: parse_upper_bound(env_var("REMINDER_60MIN_WINDOW_MINUTES")),
            reminders_job_interval_secs: parse_job_interval(env_var("REMINDERS_JOB_INTERVAL_SECS")),
            email,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
