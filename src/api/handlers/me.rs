use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::Principal;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub user_id: String,
}

#[utoipa::path(
    get,
    path = "/v1/me",
    responses(
        (status = 200, description = "Authenticated caller", body = MeResponse, content_type = "application/json"),
        (status = 401, description = "Unauthorized"),
    ),
    tag = "varco"
)]
pub async fn me(principal: Option<Extension<Principal>>) -> impl IntoResponse {
    match principal {
        Some(Extension(principal)) => (
            StatusCode::OK,
            Json(MeResponse {
                user_id: principal.user_id.to_string(),
            }),
        )
            .into_response(),
        None => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}
