//! User endpoints

use std::str::FromStr;

use axum::extract::{Path, State};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, JsonRejection};
use crate::domain::{OperationError, User, UserId};
use crate::infrastructure::validator::{FieldRules, Rule, Validate};

const GET: &str = "http - v0 - get";
const CREATE: &str = "http - v0 - create";
const UPDATE: &str = "http - v0 - update";
const DELETE: &str = "http - v0 - delete";

/// Request body for create and update.
/// Missing or null fields decode as empty strings and fail validation instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Validate for UserInput {
    fn field_rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new("Name", &self.name, &[Rule::Required]),
            FieldRules::new("Phone", &self.phone, &[Rule::Required, Rule::PhoneFormat]),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOutput {
    pub id: UserId,
    pub name: String,
    pub phone: String,
}

impl From<User> for UserOutput {
    fn from(user: User) -> Self {
        Self {
            id: *user.id(),
            name: user.name().to_string(),
            phone: user.phone().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

fn parse_id(raw: &str, operation: &'static str, message: &'static str) -> Result<UserId, ApiError> {
    UserId::from_str(raw).map_err(|e| {
        error!(error = %e, id = %raw, "{}", operation);
        ApiError::bad_request(message)
    })
}

fn parse_input(
    state: &AppState,
    payload: Result<Json<UserInput>, JsonRejection>,
    operation: &'static str,
) -> Result<UserInput, ApiError> {
    let Json(input) = payload.map_err(|e| {
        error!(error = %e, "{}", operation);
        ApiError::bad_request(crate::api::types::json::INVALID_BODY_MESSAGE)
    })?;

    state.validator.validate(&input).map_err(|e| {
        error!(error = %e, "{}", operation);
        ApiError::bad_request(format!("invalid request data: {}", e))
    })?;

    Ok(input)
}

fn use_case_error(state: &AppState, operation: &'static str, err: OperationError) -> ApiError {
    error!(error = %err, "{}", operation);
    ApiError::from_operation(&err, state.error_mapping)
}

/// GET /v0/user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserOutput>, ApiError> {
    let id = parse_id(&id, GET, "invalid UUID format")?;
    debug!(%id, "Getting user");

    let user = state
        .user_service
        .get_user_by_id(User::with_id(id))
        .await
        .map_err(|e| use_case_error(&state, GET, e))?;

    Ok(Json(UserOutput::from(user)))
}

/// POST /v0/user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<UserOutput>, ApiError> {
    let input = parse_input(&state, payload, CREATE)?;
    debug!(name = %input.name, "Creating user");

    let user = state
        .user_service
        .create_user(User::new(input.name, input.phone))
        .await
        .map_err(|e| use_case_error(&state, CREATE, e))?;

    Ok(Json(UserOutput::from(user)))
}

/// PUT /v0/user/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, UPDATE, "invalid UUID format")?;
    let input = parse_input(&state, payload, UPDATE)?;
    debug!(%id, "Updating user");

    state
        .user_service
        .update_user(User::with_fields(id, input.name, input.phone))
        .await
        .map_err(|e| use_case_error(&state, UPDATE, e))?;

    Ok(MessageResponse::new("Successfully updated"))
}

/// DELETE /v0/user/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, DELETE, "Invalid UUID format")?;
    debug!(%id, "Deleting user");

    state
        .user_service
        .delete_user(User::with_id(id))
        .await
        .map_err(|e| use_case_error(&state, DELETE, e))?;

    Ok(MessageResponse::new("Successfully deleted"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use mockall::predicate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::MockUserServiceTrait;
    use crate::config::ErrorMapping;
    use crate::domain::DomainError;

    const PHONE: &str = "+5511999999999";

    fn app(service: MockUserServiceTrait) -> Router {
        app_with_mapping(service, ErrorMapping::Strict)
    }

    fn app_with_mapping(service: MockUserServiceTrait, mapping: ErrorMapping) -> Router {
        let state = AppState::new(Arc::new(service)).with_error_mapping(mapping);
        Router::new()
            .nest("/v0", crate::api::v0::create_v0_router())
            .with_state(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn not_found(operation: &'static str) -> OperationError {
        OperationError::new(operation, DomainError::not_found("record not found"))
    }

    #[tokio::test]
    async fn test_get_user() {
        let user = User::with_fields(UserId::generate(), "Ana", PHONE);
        let id = *user.id();
        let stored = user.clone();
        let mut service = MockUserServiceTrait::new();
        service
            .expect_get_user_by_id()
            .with(predicate::function(move |u: &User| u.id() == &id))
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let (status, body) = send(app(service), "GET", &format!("/v0/user/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": id.to_string(), "name": "Ana", "phone": PHONE}));
    }

    #[tokio::test]
    async fn test_get_user_malformed_id() {
        let mut service = MockUserServiceTrait::new();
        service.expect_get_user_by_id().never();

        let (status, body) = send(app(service), "GET", "/v0/user/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid UUID format"}));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut service = MockUserServiceTrait::new();
        service
            .expect_get_user_by_id()
            .returning(|_| Err(not_found("GetUserById")));

        let uri = format!("/v0/user/{}", UserId::generate());
        let (status, body) = send(app(service), "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "GetUserById: Not found: record not found"}));
    }

    #[tokio::test]
    async fn test_get_user_not_found_legacy_mapping() {
        let mut service = MockUserServiceTrait::new();
        service
            .expect_get_user_by_id()
            .returning(|_| Err(not_found("GetUserById")));

        let uri = format!("/v0/user/{}", UserId::generate());
        let (status, body) =
            send(app_with_mapping(service, ErrorMapping::Legacy), "GET", &uri, None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "GetUserById: Not found: record not found");
    }

    #[tokio::test]
    async fn test_create_user() {
        let mut service = MockUserServiceTrait::new();
        service
            .expect_create_user()
            .withf(|u| u.name() == "Ana" && u.phone() == PHONE)
            .times(1)
            .returning(|u| Ok(u));

        let (status, body) = send(
            app(service),
            "POST",
            "/v0/user",
            Some(json!({"name": "Ana", "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["phone"], PHONE);
        assert!(body["id"].as_str().unwrap().parse::<UserId>().is_ok());
    }

    #[tokio::test]
    async fn test_create_user_invalid_body() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().never();

        let request = Request::builder()
            .method("POST")
            .uri("/v0/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = app(service).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "invalid request body"}));
    }

    #[tokio::test]
    async fn test_create_user_wrong_field_type() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().never();

        let (status, body) = send(
            app(service),
            "POST",
            "/v0/user",
            Some(json!({"name": 42, "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid request body"}));
    }

    #[tokio::test]
    async fn test_create_user_invalid_phone() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().never();

        let (status, body) = send(
            app(service),
            "POST",
            "/v0/user",
            Some(json!({"name": "A", "phone": "12345"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Invalid phone number '12345'. Expected format: '+55XXXXXXXXXX' or '+55XXXXXXXXXXX'."})
        );
    }

    #[tokio::test]
    async fn test_create_user_missing_name() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().never();

        let (status, body) =
            send(app(service), "POST", "/v0/user", Some(json!({"phone": PHONE}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Field validation for 'Name' failed on the 'required' tag."})
        );
    }

    #[tokio::test]
    async fn test_create_user_null_fields_are_required() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().never();

        let (status, body) = send(
            app(service),
            "POST",
            "/v0/user",
            Some(json!({"name": null, "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Field validation for 'Name' failed on the 'required' tag."})
        );
    }

    #[tokio::test]
    async fn test_create_user_store_failure() {
        let mut service = MockUserServiceTrait::new();
        service.expect_create_user().returning(|_| {
            Err(OperationError::new("CreateUser", DomainError::storage("some error")))
        });

        let (status, body) = send(
            app(service),
            "POST",
            "/v0/user",
            Some(json!({"name": "Ana", "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "CreateUser: Storage error: some error"}));
    }

    #[tokio::test]
    async fn test_update_user() {
        let id = UserId::generate();
        let mut service = MockUserServiceTrait::new();
        service
            .expect_update_user()
            .withf(move |u| u.id() == &id && u.name() == "Bia" && u.phone() == PHONE)
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) = send(
            app(service),
            "PUT",
            &format!("/v0/user/{}", id),
            Some(json!({"name": "Bia", "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Successfully updated"}));
    }

    #[tokio::test]
    async fn test_update_user_id_checked_before_body() {
        let mut service = MockUserServiceTrait::new();
        service.expect_update_user().never();

        let (status, body) =
            send(app(service), "PUT", "/v0/user/123", Some(json!({"name": ""}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid UUID format"}));
    }

    #[tokio::test]
    async fn test_update_user_validation() {
        let mut service = MockUserServiceTrait::new();
        service.expect_update_user().never();

        let (status, body) = send(
            app(service),
            "PUT",
            &format!("/v0/user/{}", UserId::generate()),
            Some(json!({"name": "", "phone": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Field validation for 'Name' failed on the 'required' tag.Field validation for 'Phone' failed on the 'required' tag."})
        );
    }

    #[tokio::test]
    async fn test_update_user_invalid_phone() {
        let mut service = MockUserServiceTrait::new();
        service.expect_update_user().never();

        let (status, body) = send(
            app(service),
            "PUT",
            &format!("/v0/user/{}", UserId::generate()),
            Some(json!({"name": "A", "phone": "12345"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Invalid phone number '12345'. Expected format: '+55XXXXXXXXXX' or '+55XXXXXXXXXXX'."})
        );
    }

    #[tokio::test]
    async fn test_update_user_null_phone_is_required() {
        let mut service = MockUserServiceTrait::new();
        service.expect_update_user().never();

        let (status, body) = send(
            app(service),
            "PUT",
            &format!("/v0/user/{}", UserId::generate()),
            Some(json!({"name": "Bia", "phone": null})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "invalid request data: Field validation for 'Phone' failed on the 'required' tag."})
        );
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut service = MockUserServiceTrait::new();
        service
            .expect_update_user()
            .returning(|_| Err(not_found("UpdateUser")));

        let (status, body) = send(
            app(service),
            "PUT",
            &format!("/v0/user/{}", UserId::generate()),
            Some(json!({"name": "Bia", "phone": PHONE})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "UpdateUser: Not found: record not found"}));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let id = UserId::generate();
        let mut service = MockUserServiceTrait::new();
        service
            .expect_delete_user()
            .withf(move |u| u.id() == &id)
            .times(1)
            .returning(|_| Ok(()));

        let (status, body) = send(app(service), "DELETE", &format!("/v0/user/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Successfully deleted"}));
    }

    #[tokio::test]
    async fn test_delete_user_malformed_id() {
        let mut service = MockUserServiceTrait::new();
        service.expect_delete_user().never();

        let (status, body) = send(app(service), "DELETE", "/v0/user/xyz", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid UUID format"}));
    }
}
