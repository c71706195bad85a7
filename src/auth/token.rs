//! Token store: issuance and the sliding idle-expiry liveness check.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use sqlx::{PgPool, Row};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::Instrument;
use uuid::Uuid;

/// Default idle timeout: one day. Configurable per deployment, never per call.
pub const DEFAULT_IDLE_TIMEOUT_SECONDS: u64 = 86_400;

/// A freshly issued access token row.
#[derive(Clone, Debug)]
pub struct AccessToken {
    /// Opaque bearer credential; primary key, unguessable.
    pub token: String,
    pub user_id: Uuid,
    /// Issuance time, fractional unix seconds.
    pub created: f64,
    /// Last confirmed-live check; `updated >= created` always.
    pub updated: f64,
    /// Idle window fixed at issuance.
    pub idle_timeout: f64,
}

impl AccessToken {
    /// Liveness predicate: live iff `now - updated < idle_timeout`.
    #[must_use]
    pub fn is_live_at(&self, now: f64) -> bool {
        is_live(self.updated, self.idle_timeout, now)
    }
}

/// Outcome of a liveness check.
///
/// `Expired` and `NotFound` are equivalent for callers (the token is dead and
/// re-authentication is required); they are distinguished for diagnostics only.
#[derive(Debug)]
pub enum Liveness {
    Live { user_id: Uuid },
    Expired,
    NotFound,
}

#[derive(Clone, Debug)]
pub struct TokenStore {
    pool: PgPool,
    idle_timeout: Duration,
}

impl TokenStore {
    #[must_use]
    pub fn new(pool: PgPool, idle_timeout: Duration) -> Self {
        Self { pool, idle_timeout }
    }

    /// Issue a new token for a user.
    ///
    /// The token string carries 256 bits from the OS CSPRNG. Insertion is
    /// retried a few times in case of a token collision.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable.
    pub async fn issue(&self, user_id: Uuid) -> Result<AccessToken> {
        let idle_timeout = self.idle_timeout.as_secs_f64();
        let query = r"
            INSERT INTO access_tokens (token, user_id, created, updated, idle_timeout)
            VALUES ($1, $2, $3, $3, $4)
        ";

        for _ in 0..3 {
            let token = generate_token()?;
            let now = unix_now()?;
            let span = tracing::info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "INSERT",
                db.statement = query
            );
            let result = sqlx::query(query)
                .bind(&token)
                .bind(user_id)
                .bind(now)
                .bind(idle_timeout)
                .execute(&self.pool)
                .instrument(span)
                .await;

            match result {
                Ok(_) => {
                    return Ok(AccessToken {
                        token,
                        user_id,
                        created: now,
                        updated: now,
                        idle_timeout,
                    })
                }
                Err(err) if super::is_unique_violation(&err) => {}
                Err(err) => return Err(err).context("failed to insert access token"),
            }
        }

        Err(anyhow!("failed to generate unique access token"))
    }

    /// Check whether a token is live and, if so, slide its deadline forward.
    ///
    /// The check-and-refresh is a single conditional `UPDATE` scoped to the
    /// token row: the refresh only happens if the stored `updated` still
    /// satisfies the liveness predicate at write time, so concurrent checks on
    /// one token cannot revive it across the idle boundary. A dead token stays
    /// dead; re-authentication issues a fresh one.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable. Storage failure is never
    /// reported as `Expired` or `NotFound`.
    pub async fn check_liveness(&self, token: &str) -> Result<Liveness> {
        let now = unix_now()?;

        let query = r"
            UPDATE access_tokens
            SET updated = GREATEST(updated, $2)
            WHERE token = $1
              AND ($2 - updated) < idle_timeout
            RETURNING user_id
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to refresh access token")?;

        if let Some(row) = row {
            return Ok(Liveness::Live {
                user_id: row.get("user_id"),
            });
        }

        // The refresh matched nothing: either the idle window elapsed or the
        // token never existed. Distinguished for diagnostics only.
        let query = "SELECT 1 FROM access_tokens WHERE token = $1 LIMIT 1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up access token")?;

        if row.is_some() {
            Ok(Liveness::Expired)
        } else {
            Ok(Liveness::NotFound)
        }
    }
}

/// Generate a new token string: 32 random bytes, base64url without padding.
fn generate_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate access token")?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn is_live(updated: f64, idle_timeout: f64, now: f64) -> bool {
    now - updated < idle_timeout
}

pub(crate) fn unix_now() -> Result<f64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::{generate_token, is_live, unix_now, AccessToken, Liveness};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use uuid::Uuid;

    #[test]
    fn generated_token_has_full_entropy() {
        let decoded_len = generate_token()
            .ok()
            .and_then(|token| URL_SAFE_NO_PAD.decode(token.as_bytes()).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(32));
    }

    #[test]
    fn generated_tokens_differ() {
        let first = generate_token().ok();
        let second = generate_token().ok();
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn live_strictly_inside_idle_window() {
        // Live at any t < T after the last refresh, dead at exactly t = T.
        assert!(is_live(0.0, 60.0, 0.0));
        assert!(is_live(0.0, 60.0, 59.999));
        assert!(!is_live(0.0, 60.0, 60.0));
        assert!(!is_live(0.0, 60.0, 3600.0));
    }

    #[test]
    fn refresh_slides_the_deadline() {
        // A refresh at t=50 keeps the token alive past the original deadline.
        let idle = 60.0;
        assert!(is_live(50.0, idle, 100.0));
        assert!(!is_live(50.0, idle, 110.0));
    }

    #[test]
    fn fresh_token_reports_live() -> anyhow::Result<()> {
        let now = unix_now()?;
        let token = AccessToken {
            token: "opaque".to_string(),
            user_id: Uuid::nil(),
            created: now,
            updated: now,
            idle_timeout: 60.0,
        };
        assert!(token.is_live_at(now + 59.0));
        assert!(!token.is_live_at(now + 60.0));
        Ok(())
    }

    #[test]
    fn clock_reads_after_epoch() -> anyhow::Result<()> {
        // A pre-epoch clock is an error, never a zero timestamp that would
        // keep every token live.
        let now = unix_now()?;
        assert!(now > 0.0);
        Ok(())
    }

    #[test]
    fn liveness_debug_names() {
        assert_eq!(format!("{:?}", Liveness::Expired), "Expired");
        assert_eq!(format!("{:?}", Liveness::NotFound), "NotFound");
    }
}
