use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::auth::{AuthState, VerifyOutcome};

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    /// Opaque bearer token; present it as `Authorization: Bearer <token>`.
    pub token: String,
    pub user_id: String,
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload").into_response();
    };

    // Unknown username and wrong password get the same generic answer.
    let account = match state
        .accounts()
        .verify(&request.username, &request.password)
        .await
    {
        Ok(VerifyOutcome::Verified(account)) => account,
        Ok(VerifyOutcome::InvalidCredentials) => {
            debug!("Invalid credentials");
            return (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
        }
        Err(err) => {
            error!("Failed to verify credentials: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.tokens().issue(account.id).await {
        Ok(issued) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: issued.token,
                user_id: account.id.to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to issue access token: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, LoginResponse};
    use anyhow::{Context, Result};
    use serde_json::json;

    #[test]
    fn login_request_round_trips() -> Result<()> {
        let request: LoginRequest = serde_json::from_value(json!({
            "username": "alice",
            "password": "correct horse",
        }))?;
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "correct horse");
        Ok(())
    }

    #[test]
    fn login_response_carries_token() -> Result<()> {
        let response = LoginResponse {
            token: "opaque-token".to_string(),
            user_id: "00000000-0000-0000-0000-000000000000".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let token = value
            .get("token")
            .and_then(serde_json::Value::as_str)
            .context("missing token")?;
        assert_eq!(token, "opaque-token");
        Ok(())
    }
}
