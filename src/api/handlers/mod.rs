pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod session;
pub use self::session::session;

pub mod me;
pub use self::me::me;

// common functions for the handlers
use axum::http::{header::AUTHORIZATION, HeaderMap};
use regex::Regex;

pub(crate) fn valid_username(username: &str) -> bool {
    // letters/digits first, then dots, dashes, underscores; 3 to 32 total
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").map_or(false, |re| re.is_match(username))
}

pub(crate) fn valid_password(password: &str) -> bool {
    (8..=128).contains(&password.chars().count())
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
