use crate::config::EmailSettings;
use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

const SEND_PATH: &str = "/api/v1.0/email/send";
const SEND_FORM_PATH: &str = "/api/v1.0/email/send-form";
const SDK_LIB_VERSION: &str = "slap-sdk-1.0";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Unconfigured(String),

    #[error("could not reach the email service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

pub type TemplateParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub body: String,
    pub params: TemplateParams,
}

#[async_trait]
pub trait ReportTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SdkSession {
    user_id: String,
}

/// The session is set up on first send and kept for the life of the transport.
/// A failed setup leaves it empty so the next send tries again.
pub struct SdkTransport {
    client: Client,
    settings: EmailSettings,
    session: OnceCell<SdkSession>,
}

impl SdkTransport {
    pub fn new(client: Client, settings: EmailSettings) -> Self {
        Self {
            client,
            settings,
            session: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.initialized()
    }

    async fn session(&self) -> Result<&SdkSession, TransportError> {
        self.session
            .get_or_try_init(|| async {
                let key = self.settings.public_key.trim();
                if key.is_empty() {
                    return Err(TransportError::Unconfigured(
                        "email SDK public key is not configured".to_string(),
                    ));
                }
                info!(service_id = %self.settings.service_id, "email SDK session initialized");
                Ok(SdkSession {
                    user_id: key.to_string(),
                })
            })
            .await
    }
}

#[async_trait]
impl ReportTransport for SdkTransport {
    fn name(&self) -> &'static str {
        "sdk"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let session = self.session().await?;

        let mut form = multipart::Form::new()
            .text("lib_version", SDK_LIB_VERSION)
            .text("service_id", self.settings.service_id.clone())
            .text("template_id", self.settings.template_id.clone())
            .text("user_id", session.user_id.clone());
        for (key, value) in &email.params {
            form = form.text(key.clone(), value.clone());
        }

        let url = format!("{}{SEND_FORM_PATH}", self.settings.api_url);
        debug!(%url, "sending report through email SDK");
        let response = self
            .client
            .post(&url)
            .timeout(self.settings.timeout)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(TransportError::Rejected {
            status: status.as_u16(),
            message: failure_message(status.as_u16(), &text),
        })
    }
}

#[derive(Debug, Serialize)]
struct RestPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

pub struct RestTransport {
    client: Client,
    settings: EmailSettings,
}

impl RestTransport {
    pub fn new(client: Client, settings: EmailSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl ReportTransport for RestTransport {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let payload = RestPayload {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: &email.params,
        };

        let url = format!("{}{SEND_PATH}", self.settings.api_url);
        debug!(%url, "sending report through email REST API");
        let response = self
            .client
            .post(&url)
            .timeout(self.settings.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(TransportError::Rejected {
            status: status.as_u16(),
            message: failure_message(status.as_u16(), &text),
        })
    }
}

// JSON `error` field, then the raw body, then the status code.
pub fn failure_message(status: u16, body: &str) -> String {
    if let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) {
        if let Some(JsonValue::String(error)) = map.get("error") {
            if !error.trim().is_empty() {
                return error.clone();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("Email service responded with status {status}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub route: &'static str,
    pub fell_back: bool,
}

#[derive(Clone)]
pub struct Mailer {
    primary: Arc<dyn ReportTransport>,
    fallback: Arc<dyn ReportTransport>,
}

impl Mailer {
    pub fn new(primary: Arc<dyn ReportTransport>, fallback: Arc<dyn ReportTransport>) -> Self {
        Self { primary, fallback }
    }

    pub fn from_settings(settings: &EmailSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self::new(
            Arc::new(SdkTransport::new(client.clone(), settings.clone())),
            Arc::new(RestTransport::new(client, settings.clone())),
        ))
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> &'static str {
        self.fallback.name()
    }

    pub async fn deliver(&self, email: &OutgoingEmail) -> Result<Delivery, TransportError> {
        match self.primary.send(email).await {
            Ok(()) => {
                return Ok(Delivery {
                    route: self.primary.name(),
                    fell_back: false,
                });
            }
            Err(err) => {
                warn!(
                    transport = self.primary.name(),
                    fallback = self.fallback.name(),
                    "primary email transport failed: {err}"
                );
            }
        }

        self.fallback.send(email).await.map(|()| Delivery {
            route: self.fallback.name(),
            fell_back: true,
        })
    }
}
