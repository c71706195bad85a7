//! # Varco (Session Authentication & Access Filtering)
//!
//! `varco` issues and validates opaque bearer tokens tied to accounts, verifies
//! credentials against salted one-way hashes, and decides per request whether
//! authentication must be enforced based on path inclusion/exclusion rules.
//!
//! ## Token Model
//!
//! Tokens are opaque, high-entropy strings with a sliding idle deadline: every
//! successful liveness check refreshes `updated` and pushes expiry forward.
//! Once the idle window elapses the token is dead for good; there is no revive
//! and no explicit revoke. Expiry is evaluated lazily at check time, never by a
//! background sweeper.
//!
//! The check-and-refresh is a single conditional `UPDATE` scoped to the token
//! row, so concurrent checks on the same token serialize at the storage layer
//! and the live/dead decision stays linearizable per token.
//!
//! ## Access Filtering
//!
//! Paths are matched against ordered inclusion and exclusion patterns, each
//! either an exact path or a wildcard prefix. Exclusions are evaluated after
//! inclusions and always win; callers rely on exclusions as an override, not a
//! competing rule of equal priority.

pub mod api;
pub mod auth;
pub mod cli;

#[cfg(test)]
pub(crate) mod test_support;
