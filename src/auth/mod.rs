//! Core authentication components: credential store, token store, and the
//! path-based access filter.

pub mod account;
pub mod filter;
pub mod password;
pub mod token;

pub use account::{Account, AccountStore, Profile, RegisterOutcome, VerifyOutcome};
pub use filter::{AccessPolicy, Decision, PathPattern};
pub use token::{AccessToken, Liveness, TokenStore};

/// Shared state handed to the HTTP layer: both stores plus the immutable
/// authorization policy supplied at startup.
#[derive(Clone, Debug)]
pub struct AuthState {
    accounts: AccountStore,
    tokens: TokenStore,
    policy: AccessPolicy,
}

impl AuthState {
    #[must_use]
    pub fn new(accounts: AccountStore, tokens: TokenStore, policy: AccessPolicy) -> Self {
        Self {
            accounts,
            tokens,
            policy,
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
