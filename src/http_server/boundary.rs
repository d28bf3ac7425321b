//! # Error boundary
//!
//! Where `AppResult` control flow turns into HTTP responses.
//!
//! Handlers return `AppError`s (or raise them through
//! [`result::unwrap`](crate::result::unwrap)); both end up as a response
//! tagged with an [`ErrorReport`]. The outermost middleware,
//! [`render_errors`], logs every report in full and decides how much of it
//! the client sees: production bodies carry the code and a generic phrase,
//! plus the per-field messages of client errors.
//!
//! Responses produced by axum itself (405, extractor rejections) carry no
//! report; the boundary classifies them by status so they share the shape.

use std::any::Any;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, RETRY_AFTER};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::errors::{format_timestamp, AppError, StructuredError};
use crate::result::recover_error;

use super::state::AppState;

/// Largest framework rejection body kept as detail
const REJECTION_BODY_LIMIT: usize = 16 * 1024;

/// Error carried on a response until the boundary renders it
#[derive(Debug, Clone)]
pub struct ErrorReport(pub Arc<AppError>);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = error_body(&self, true);
        let retry_after = self
            .field("retryAfter")
            .and_then(Value::as_i64)
            .and_then(|secs| HeaderValue::from_str(&secs.to_string()).ok());

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(retry_after) = retry_after {
            response.headers_mut().insert(RETRY_AFTER, retry_after);
        }
        response.extensions_mut().insert(ErrorReport(Arc::new(self)));
        response
    }
}

/// JSON body for an error response.
///
/// Without details, a client error keeps its own message and `fields`
/// context when it has per-field messages; everything else is reduced to
/// the kind's public phrase.
pub fn error_body(error: &dyn StructuredError, expose_details: bool) -> Value {
    if expose_details {
        return json!({
            "error": error.code(),
            "message": error.message(),
            "context": Value::Object(error.context().clone()),
            "timestamp": format_timestamp(error.timestamp()),
        });
    }

    match error.context().get("fields") {
        Some(fields) if error.status_code() < 500 => json!({
            "error": error.code(),
            "message": error.message(),
            "context": { "fields": fields },
        }),
        _ => json!({
            "error": error.code(),
            "message": error.public_message(),
        }),
    }
}

/// Error for an untagged error response, classified by its status
fn rejection_error(status: StatusCode, detail: String) -> AppError {
    let reason = status.canonical_reason().unwrap_or("Request failed");
    let error = match status {
        StatusCode::UNAUTHORIZED => AppError::authentication(reason),
        StatusCode::FORBIDDEN => AppError::authorization(reason),
        StatusCode::NOT_FOUND => AppError::not_found(reason),
        StatusCode::TOO_MANY_REQUESTS => AppError::rate_limit(reason),
        s if s.is_server_error() => AppError::internal(reason),
        _ => AppError::validation(reason),
    };
    let error = error.with_field("status", status.as_u16());
    if detail.is_empty() {
        error
    } else {
        error.with_field("detail", detail)
    }
}

/// Response for a panic caught while handling a request.
///
/// An `AppError` payload (from `result::unwrap`) is answered as that error;
/// anything else is an internal error.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    match recover_error::<AppError>(payload) {
        Ok(error) => error.into_response(),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            AppError::internal("Internal server error")
                .with_field("panic", detail)
                .into_response()
        }
    }
}

/// Log error responses and rewrite their bodies for the audience
pub async fn render_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    let report = response.extensions().get::<ErrorReport>().cloned();
    let (error, mut parts) = match report {
        Some(ErrorReport(error)) => (error, response.into_parts().0),
        None if status.is_client_error() || status.is_server_error() => {
            let (parts, body) = response.into_parts();
            let detail = to_bytes(body, REJECTION_BODY_LIMIT)
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
                .unwrap_or_default();
            (Arc::new(rejection_error(status, detail)), parts)
        }
        None => return response,
    };

    let context = json!({ "method": method, "path": path });
    if error.kind().is_server_error() {
        let loggable: &dyn StructuredError = error.as_ref();
        state
            .logger
            .error("Request failed", Some(loggable), Some(context));
    } else {
        let mut context = context;
        context["error"] = error.to_loggable();
        state.logger.warn("Request rejected", Some(context));
    }

    let body = error_body(error.as_ref(), state.expose_error_details());
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::panic::catch_unwind;

    #[test]
    fn test_into_response_status_and_report() {
        let response = AppError::not_found("Post not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.0.message(), "Post not found");
    }

    #[test]
    fn test_rate_limit_sets_retry_after() {
        let response = AppError::rate_limit("Too many requests")
            .with_field("retryAfter", 42)
            .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[RETRY_AFTER], "42");
    }

    #[test]
    fn test_error_body_redacted() {
        let error = AppError::internal("connection refused: db.internal:5432")
            .with_field("host", "db.internal");
        let body = error_body(&error, false);

        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("context").is_none());
        assert!(!body.to_string().contains("db.internal"));
    }

    #[test]
    fn test_error_body_keeps_fields_of_client_errors() {
        let error = AppError::validation("Validation failed")
            .with_field("fields", json!({ "email": ["Invalid email address"] }))
            .with_field("client", "203.0.113.9");
        let body = error_body(&error, false);

        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["context"]["fields"]["email"][0], "Invalid email address");
        assert!(body["context"].get("client").is_none());
        assert!(body.get("timestamp").is_none());
    }

    #[test]
    fn test_error_body_server_fields_redacted() {
        let error = AppError::internal("bad row").with_field("fields", json!({ "id": ["x"] }));
        let body = error_body(&error, false);
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("context").is_none());
    }

    #[test]
    fn test_rejection_error_by_status() {
        let error = rejection_error(StatusCode::METHOD_NOT_ALLOWED, String::new());
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.message(), "Method Not Allowed");
        assert_eq!(error.field("status").unwrap(), 405);
        assert!(error.field("detail").is_none());

        let error = rejection_error(StatusCode::BAD_REQUEST, "Failed to deserialize".to_string());
        assert_eq!(error.field("detail").unwrap(), "Failed to deserialize");

        assert_eq!(
            rejection_error(StatusCode::NOT_FOUND, String::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            rejection_error(StatusCode::SERVICE_UNAVAILABLE, String::new()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_error_body_detailed() {
        let error = AppError::validation("Validation failed").with_field("fields", json!({}));
        let body = error_body(&error, true);

        assert_eq!(body["message"], "Validation failed");
        assert!(body["context"].get("fields").is_some());
        assert!(body.get("stack").is_none());
    }

    #[test]
    fn test_panic_response_recovers_app_error() {
        let payload = catch_unwind(|| {
            crate::result::unwrap::<(), _>(Err(AppError::authorization("Admin access required")))
        })
        .unwrap_err();
        let response = panic_response(payload);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_panic_response_foreign_payload() {
        let payload = catch_unwind(|| panic!("index out of bounds")).unwrap_err();
        let response = panic_response(payload);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.0.field("panic").unwrap(), "index out of bounds");
    }
}
