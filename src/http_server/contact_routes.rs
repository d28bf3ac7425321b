//! Contact form HTTP route

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::errors::AppResult;
use crate::validation::{validate_contact, ContactForm};

use super::extract::JsonBody;
use super::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

pub fn contact_routes() -> Router<Arc<AppState>> {
    Router::new().route("/contact", post(submit_handler))
}

async fn submit_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<ContactForm>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let submission = validate_contact(form)?;

    state.logger.info(
        "Contact form submitted",
        Some(json!({
            "submissionId": submission.id,
            "service": submission.service.as_str(),
            "hasBudget": submission.budget.is_some(),
        })),
    );

    let response = ContactResponse {
        success: true,
        message: "Thanks for reaching out. We'll get back to you within one business day."
            .to_string(),
        submission_id: submission.id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
