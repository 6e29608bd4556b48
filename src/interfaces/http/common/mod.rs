//! Shared HTTP building blocks

pub mod validated_form;
pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::PaginatedResult;

pub use validated_form::ValidatedForm;
pub use validated_json::ValidatedJson;

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Paginated list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T, U: Into<T>> From<PaginatedResult<U>> for PaginatedResponse<T> {
    fn from(result: PaginatedResult<U>) -> Self {
        Self {
            items: result.items.into_iter().map(Into::into).collect(),
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Error half of every handler's `Result`
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain error onto its HTTP status and envelope.
pub fn api_error(e: DomainError) -> ApiError {
    let (status, message) = match e {
        DomainError::NotFound { entity, value, .. } => (
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, value),
        ),
        DomainError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        DomainError::Database(msg) => {
            error!(error = %msg, "Database failure while handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        DomainError::Internal(msg) => {
            error!(error = %msg, "Internal failure while handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ApiResponse::error(message)))
}

/// Treat an empty form field (`password=`) as an absent one.
///
/// Only the exact empty string is dropped; whitespace is kept so that
/// validation can reject it.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("User", "x"), StatusCode::NOT_FOUND),
            (DomainError::Validation("v".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Conflict("c".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (DomainError::Database("secret detail".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Internal("bad cost".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let (status, Json(body)) = api_error(err);
            assert_eq!(status, expected);
            assert!(!body.success);
        }
    }

    #[test]
    fn database_details_are_not_leaked() {
        let (_, Json(body)) = api_error(DomainError::Database("disk I/O error".into()));
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let (_, Json(body)) = api_error(DomainError::Internal("Invalid cost: 40".into()));
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[derive(Debug, Deserialize)]
    struct OptionalField {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        value: Option<String>,
    }

    #[test]
    fn only_the_empty_string_is_absent() {
        let empty: OptionalField = serde_json::from_str(r#"{"value":""}"#).unwrap();
        assert!(empty.value.is_none());

        let missing: OptionalField = serde_json::from_str("{}").unwrap();
        assert!(missing.value.is_none());

        let blank: OptionalField = serde_json::from_str(r#"{"value":"    "}"#).unwrap();
        assert_eq!(blank.value.as_deref(), Some("    "));
    }
}
