use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SERVICE_ID: &str = "service_slap";
pub const DEFAULT_TEMPLATE_ID: &str = "template_slap_report";
pub const DEFAULT_PUBLIC_KEY: &str = "slap_public_key";
pub const DEFAULT_API_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            service_id: DEFAULT_SERVICE_ID.to_string(),
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            public_key: DEFAULT_PUBLIC_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub email: EmailSettings,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = text(&lookup, "SLAP_EMAIL_API_URL", DEFAULT_API_URL);

        Self {
            port: parsed(&lookup, "PORT", DEFAULT_PORT),
            email: EmailSettings {
                service_id: text(&lookup, "SLAP_EMAIL_SERVICE_ID", DEFAULT_SERVICE_ID),
                template_id: text(&lookup, "SLAP_EMAIL_TEMPLATE_ID", DEFAULT_TEMPLATE_ID),
                public_key: text(&lookup, "SLAP_EMAIL_PUBLIC_KEY", DEFAULT_PUBLIC_KEY),
                api_url: api_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(parsed(
                    &lookup,
                    "SLAP_EMAIL_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )),
            },
        }
    }
}

fn text(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            info!("{key} not set, using default");
            default.to_string()
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|err| {
        warn!("Invalid {key} value {raw:?}: {err}, using default: {default}");
        default
    })
}
