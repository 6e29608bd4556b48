//! Validated form extractor
//!
//! Same contract as [`ValidatedJson`](super::ValidatedJson) for
//! `application/x-www-form-urlencoded` bodies: 400 when the body cannot be
//! decoded, 422 with field messages when validation fails.

use axum::extract::rejection::FormRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::validated_json::validation_message;
use super::ApiResponse;

pub struct ValidatedForm<T>(pub T);

pub enum ValidatedFormRejection {
    FormError(FormRejection),
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::FormError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid form: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let body = ApiResponse::<()>::error(validation_message(&errors));
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedFormRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidatedFormRejection::FormError)?;

        value
            .validate()
            .map_err(ValidatedFormRejection::ValidationError)?;

        Ok(ValidatedForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[serde(default)]
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[serde(default)]
        #[validate(email(message = "invalid email format"))]
        email: String,
    }

    async fn handler(ValidatedForm(body): ValidatedForm<Signup>) -> String {
        format!("{} <{}>", body.name, body.email)
    }

    async fn post_form(body: &'static str, content_type: &str) -> Response {
        Router::new()
            .route("/signup", post(handler))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_form_passes() {
        let resp = post_form(
            "name=test+user&email=test%40test.com",
            "application/x-www-form-urlencoded",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_fields_fail_validation() {
        let resp = post_form("", "application/x-www-form-urlencoded").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn wrong_content_type_is_rejected() {
        let resp = post_form("{}", "application/json").await;
        assert!(resp.status().is_client_error());
        assert_ne!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
