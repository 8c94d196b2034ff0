//! Custom JSON extractor that returns errors as JSON

use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::error::ApiError;

/// Message returned for every undecodable body
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Wrapper around `axum::Json` whose rejections use the API error format
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Body decoding failure. Displays the underlying reason for logs and
/// responds with a 400 carrying [`INVALID_BODY_MESSAGE`].
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct JsonRejection {
    reason: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        ApiError::bad_request(INVALID_BODY_MESSAGE).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                reason: format_rejection_message(&rejection),
            }),
        }
    }
}

fn format_rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let Json(payload) =
            Json::<Payload>::from_request(request(Some("application/json"), r#"{"name":"Ana"}"#), &())
                .await
                .unwrap();

        assert_eq!(payload.name, "Ana");
    }

    #[tokio::test]
    async fn test_syntax_error_is_rejected() {
        let rejection =
            Json::<Payload>::from_request(request(Some("application/json"), "{not json"), &())
                .await
                .unwrap_err();

        assert!(rejection.to_string().starts_with("Invalid JSON syntax"));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let rejection = Json::<Payload>::from_request(request(None, r#"{"name":"Ana"}"#), &())
            .await
            .unwrap_err();

        assert!(rejection.to_string().contains("Content-Type"));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
