use crate::config::Config;
use crate::mailer::Mailer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(config: Config, mailer: Mailer) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }

    pub fn from_config(config: Config) -> Result<Self, reqwest::Error> {
        let mailer = Mailer::from_settings(&config.email)?;
        Ok(Self::new(config, mailer))
    }
}
