//! Route handlers

use super::auth::verify_api_key;
use super::dto::{AskRequest, WebAskForm, WebResponse};
use super::error::ApiError;
use super::state::AppState;
use axum::{
    Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::HeaderMap,
    response::Html,
};
use fusion_application::RunFusionInput;
use fusion_domain::{FusionResult, preview};
use serde_json::{Value, json};
use tracing::{info, warn};

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

/// `POST /ask`
pub async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<FusionResult>, ApiError> {
    if let Err(e) = verify_api_key(state.api_key.as_deref(), &headers) {
        warn!("Rejected /ask: {}", e);
        return Err(e);
    }

    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let question = request
        .question
        .ok_or_else(|| ApiError::Validation("question is required".to_string()))?;

    info!(
        question = %preview(&question, 100),
        chars = question.chars().count(),
        "API request"
    );

    let input = RunFusionInput::new(question).with_system_message(request.system_message);
    let result = state.fusion.execute(input).await?;
    Ok(Json(result))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /` - web form carrying a fresh CSRF token
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{csrf_token}}", &state.csrf.issue()))
}

/// `POST /web-ask`
pub async fn web_ask(
    State(state): State<AppState>,
    form: Result<Form<WebAskForm>, FormRejection>,
) -> Result<Json<WebResponse>, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::Validation(e.body_text()))?;

    let token_ok = form
        .csrf_token
        .as_deref()
        .is_some_and(|t| state.csrf.validate(t));
    if !token_ok {
        warn!("Rejected /web-ask: invalid or expired CSRF token");
        return Err(ApiError::InvalidCsrfToken);
    }

    let question = form
        .question
        .ok_or_else(|| ApiError::Validation("question is required".to_string()))?;

    info!(
        question = %preview(&question, 100),
        chars = question.chars().count(),
        "Web request"
    );

    let result = state.fusion.execute(RunFusionInput::new(question)).await?;
    Ok(Json(WebResponse {
        response: result.judge.final_answer,
    }))
}
