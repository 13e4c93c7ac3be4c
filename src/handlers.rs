use crate::dashboard::build_dashboard;
use crate::errors::AppError;
use crate::models::{
    DashboardQuery, DashboardView, HealthResponse, ReportFormFields, ReportRequest,
    ReportResponse, SubmissionOutcome,
};
use crate::report::{ReportForm, Status};
use crate::state::AppState;
use crate::ui;
use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::Html,
};
use tracing::debug;

const UNREADABLE_FORM: &str = "We couldn't read your report. Please check the form and try again.";

pub async fn home() -> Html<String> {
    Html(ui::render_home())
}

pub async fn law() -> Html<String> {
    Html(ui::render_law())
}

pub async fn privacy() -> Html<String> {
    Html(ui::render_privacy())
}

pub async fn thanks() -> Html<String> {
    Html(ui::render_thanks())
}

pub async fn data(
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query?;
    let view = build_dashboard(&query)?;
    Ok(Html(ui::render_dashboard(&view)))
}

pub async fn get_dashboard(
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardView>, AppError> {
    let Query(query) = query?;
    Ok(Json(build_dashboard(&query)?))
}

pub async fn report_form() -> Html<String> {
    Html(ui::render_report(&ReportForm::default()))
}

pub async fn submit_report_form(
    State(state): State<AppState>,
    fields: Result<Form<ReportFormFields>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let fields = match fields {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!("report form rejected: {}", rejection.body_text());
            let form = ReportForm {
                status: Some(Status::Error(UNREADABLE_FORM.to_string())),
                ..ReportForm::default()
            };
            return (rejection.status(), Html(ui::render_report(&form)));
        }
    };
    let mut form = ReportForm::new(fields.into());
    let outcome = form.submit(&state.mailer).await;
    (outcome_status(outcome), Html(ui::render_report(&form)))
}

pub async fn submit_report(
    State(state): State<AppState>,
    request: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    let Json(request) = request?;
    let mut form = ReportForm::new(request.into());
    let outcome = form.submit(&state.mailer).await;
    Ok((outcome_status(outcome), Json(form.into_response(outcome))))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}

fn outcome_status(outcome: SubmissionOutcome) -> StatusCode {
    match outcome {
        SubmissionOutcome::Sent => StatusCode::OK,
        SubmissionOutcome::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Failed => StatusCode::BAD_GATEWAY,
    }
}
