use super::handlers;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::register::register,
        handlers::login::login,
        handlers::session::session,
        handlers::me::me,
    ),
    components(schemas(
        handlers::register::RegisterRequest,
        handlers::register::RegisterResponse,
        handlers::login::LoginRequest,
        handlers::login::LoginResponse,
        handlers::session::SessionResponse,
        handlers::me::MeResponse,
    )),
    tags(
        (name = "varco", description = "Session authentication and access filtering API"),
        (name = "auth", description = "Registration, login, and token liveness"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
