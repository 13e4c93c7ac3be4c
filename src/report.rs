use crate::mailer::{Mailer, OutgoingEmail, TemplateParams};
use crate::models::{Grade, ReportFormFields, ReportRequest, ReportResponse, SubmissionOutcome};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const UNNAMED_PLACEHOLDER: &str = "Unnamed";
pub const SENT_MESSAGE: &str = "Thank you! Your report was sent to your school's administration.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your school name.")]
    MissingSchool,

    #[error("Please enter a valid principal email address.")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Sending { transport: &'static str },
    Sent { transport: &'static str },
    Invalid(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Success(message) | Status::Error(message) => message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSubmission {
    pub grade: Grade,
    pub school: String,
    pub principal_email: String,
    pub anonymous: bool,
    pub your_name: String,
}

impl From<ReportFormFields> for ReportSubmission {
    fn from(fields: ReportFormFields) -> Self {
        Self {
            grade: fields.grade,
            school: fields.school,
            principal_email: fields.principal_email,
            anonymous: fields.anonymous.is_some(),
            your_name: fields.your_name,
        }
    }
}

impl From<ReportRequest> for ReportSubmission {
    fn from(request: ReportRequest) -> Self {
        Self {
            grade: request.grade,
            school: request.school,
            principal_email: request.principal_email,
            anonymous: request.anonymous,
            your_name: request.your_name,
        }
    }
}

impl ReportSubmission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.school.trim().is_empty() {
            return Err(ValidationError::MissingSchool);
        }
        if !is_valid_email(self.principal_email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        if self.anonymous {
            return ANONYMOUS_NAME;
        }
        match self.your_name.trim() {
            "" => UNNAMED_PLACEHOLDER,
            name => name,
        }
    }

    pub fn subject(&self) -> String {
        format!("Menstrual Equity Report: {}", self.school.trim())
    }

    pub fn body(&self) -> String {
        format!(
            "Hello,\n\n\
             A student at {school} has reported that the campus is not meeting the \
             requirements of California's Menstrual Equity Act (AB 367), which requires \
             free menstrual products to be available in school restrooms.\n\n\
             School: {school}\n\
             Grade: {grade}\n\
             Reported by: {name} Student Report\n\n\
             Please review product availability and restocking on campus.\n\n\
             Sent through the Student Legislative Accountability Project (SLAP).",
            school = self.school.trim(),
            grade = self.grade.label(),
            name = self.display_name(),
        )
    }

    // Recipient, message and reporter are repeated under each name a template may use.
    pub fn compose(&self) -> OutgoingEmail {
        let subject = self.subject();
        let body = self.body();
        let recipient = self.principal_email.trim().to_string();
        let school = self.school.trim().to_string();
        let reporter = self.display_name().to_string();

        let mut params = TemplateParams::new();
        for key in ["to", "to_email", "recipient", "recipient_email", "email", "principal_email"] {
            params.insert(key.to_string(), recipient.clone());
        }
        for key in ["subject", "title"] {
            params.insert(key.to_string(), subject.clone());
        }
        for key in ["message", "body", "content"] {
            params.insert(key.to_string(), body.clone());
        }
        for key in ["from_name", "name", "reporter", "reporter_name"] {
            params.insert(key.to_string(), reporter.clone());
        }
        for key in ["school", "school_name"] {
            params.insert(key.to_string(), school.clone());
        }
        params.insert("grade".to_string(), self.grade.label().to_string());
        params.insert("anonymous".to_string(), self.anonymous.to_string());
        params.insert("reply_to".to_string(), String::new());

        OutgoingEmail { subject, body, params }
    }

    pub fn clear(&mut self) {
        self.school.clear();
        self.principal_email.clear();
        self.your_name.clear();
    }
}

/// `trace` records every state a submission passes through, ending in `Idle`.
#[derive(Debug, Default)]
pub struct ReportForm {
    pub fields: ReportSubmission,
    pub status: Option<Status>,
    pub trace: Vec<SubmissionState>,
    pub route: Option<&'static str>,
}

impl ReportForm {
    pub fn new(fields: ReportSubmission) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    fn enter(&mut self, state: SubmissionState) {
        debug!(?state, "report submission state");
        self.trace.push(state);
    }

    pub async fn submit(&mut self, mailer: &Mailer) -> SubmissionOutcome {
        self.trace.clear();
        self.route = None;
        self.enter(SubmissionState::Validating);

        if let Err(err) = self.fields.validate() {
            let message = err.to_string();
            self.enter(SubmissionState::Invalid(message.clone()));
            self.enter(SubmissionState::Idle);
            self.status = Some(Status::Error(message));
            return SubmissionOutcome::Invalid;
        }

        let email = self.fields.compose();
        self.enter(SubmissionState::Sending {
            transport: mailer.primary_name(),
        });

        let outcome = match mailer.deliver(&email).await {
            Ok(delivery) => {
                if delivery.fell_back {
                    self.enter(SubmissionState::Sending {
                        transport: delivery.route,
                    });
                }
                self.enter(SubmissionState::Sent {
                    transport: delivery.route,
                });
                info!(route = delivery.route, school = %self.fields.school.trim(), "report sent");
                self.route = Some(delivery.route);
                self.fields.clear();
                self.status = Some(Status::Success(SENT_MESSAGE.to_string()));
                SubmissionOutcome::Sent
            }
            Err(err) => {
                warn!("report delivery failed: {err}");
                let message = format!("We couldn't send your report: {err}");
                self.enter(SubmissionState::Sending {
                    transport: mailer.fallback_name(),
                });
                self.enter(SubmissionState::Failed(message.clone()));
                self.status = Some(Status::Error(message));
                SubmissionOutcome::Failed
            }
        };

        self.enter(SubmissionState::Idle);
        outcome
    }

    pub fn into_response(self, outcome: SubmissionOutcome) -> ReportResponse {
        ReportResponse {
            outcome,
            message: self.status.map(|s| s.message().to_string()).unwrap_or_default(),
            route: self.route.map(str::to_string),
            grade: self.fields.grade,
            school: self.fields.school,
            principal_email: self.fields.principal_email,
            anonymous: self.fields.anonymous,
            your_name: self.fields.your_name,
        }
    }
}
