use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use super::{valid_password, valid_username};
use crate::auth::{AuthState, Profile, RegisterOutcome};

#[derive(ToSchema, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse, content_type = "application/json"),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already taken"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: Extension<Arc<AuthState>>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload").into_response();
    };

    if !valid_username(&request.username) {
        return (StatusCode::BAD_REQUEST, "Invalid username").into_response();
    }

    if !valid_password(&request.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password").into_response();
    }

    let profile = Profile {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
    };

    match state
        .accounts()
        .register(&request.username, &request.password, profile)
        .await
    {
        Ok(RegisterOutcome::Created(account)) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                id: account.id.to_string(),
                username: account.username,
            }),
        )
            .into_response(),
        Ok(RegisterOutcome::DuplicateUsername) => {
            (StatusCode::CONFLICT, "Username already taken").into_response()
        }
        Err(err) => {
            error!("Failed to register account: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
