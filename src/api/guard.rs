//! Request guard: populates the authenticated principal from the bearer token
//! and enforces the access policy before requests reach handler logic.

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::{AuthState, Decision, Liveness};

/// The authenticated caller, inserted as a request extension on Allow.
#[derive(Clone, Copy, Debug)]
pub struct Principal {
    pub user_id: Uuid,
}

/// Authenticate the request (if it carries a bearer token) and apply the
/// access policy to the request path.
///
/// A storage failure during the liveness check surfaces as 500: masking an
/// operational failure as "not authenticated" would turn outages into silent
/// security denials.
pub async fn enforce(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let mut principal = None;
    if let Some(token) = super::handlers::extract_bearer_token(request.headers()) {
        match state.tokens().check_liveness(&token).await {
            Ok(Liveness::Live { user_id }) => principal = Some(Principal { user_id }),
            Ok(Liveness::Expired) => debug!("Bearer token expired"),
            Ok(Liveness::NotFound) => debug!("Bearer token unknown"),
            Err(err) => {
                error!("Failed to check token liveness: {err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }

    match state.policy().decide(&path, principal.is_some()) {
        Decision::Reject => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
        Decision::Allow => {
            if let Some(principal) = principal {
                request.extensions_mut().insert(principal);
            }
            next.run(request).await
        }
    }
}
