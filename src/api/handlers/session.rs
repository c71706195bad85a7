use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::Principal;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
}

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Token is live", body = SessionResponse, content_type = "application/json"),
        (status = 204, description = "No live token"),
    ),
    tag = "auth"
)]
// The guard already ran the liveness check (and refreshed the deadline) for
// the bearer token on this request; a live token shows up as a principal.
pub async fn session(principal: Option<Extension<Principal>>) -> impl IntoResponse {
    match principal {
        Some(Extension(principal)) => (
            StatusCode::OK,
            Json(SessionResponse {
                user_id: principal.user_id.to_string(),
            }),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
