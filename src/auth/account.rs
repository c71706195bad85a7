//! Credential store: account records and username/password verification.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::{warn, Instrument};
use uuid::Uuid;

use super::{is_unique_violation, password};

/// A persisted account row, mapped to fixed named fields.
#[derive(Clone, Debug)]
pub struct Account {
    pub id: Uuid,
    /// Login key; immutable once set at creation.
    pub username: String,
    /// PHC hash string; only ever produced by [`password::hash`].
    pub password_hash: String,
    pub facebook_id: Option<String>,
    pub google_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Optional display attributes captured at registration.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Outcome when creating a new account.
#[derive(Debug)]
pub enum RegisterOutcome {
    Created(Account),
    DuplicateUsername,
}

/// Outcome when checking a username/password pair.
///
/// Unknown username and wrong password collapse into the same variant so the
/// caller cannot enumerate accounts.
#[derive(Debug)]
pub enum VerifyOutcome {
    Verified(Account),
    InvalidCredentials,
}

#[derive(Clone, Debug)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account with a freshly hashed password.
    ///
    /// # Errors
    /// Returns an error if hashing fails or the store is unavailable.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        profile: Profile,
    ) -> Result<RegisterOutcome> {
        let password_hash = password::hash(password)?;

        let query = r"
            INSERT INTO accounts
                (username, password_hash, first_name, last_name, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .bind(&password_hash)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.email)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        let id: Uuid = match row {
            Ok(row) => row.get("id"),
            Err(err) => {
                if is_unique_violation(&err) {
                    return Ok(RegisterOutcome::DuplicateUsername);
                }
                return Err(err).context("failed to insert account");
            }
        };

        Ok(RegisterOutcome::Created(Account {
            id,
            username: username.to_string(),
            password_hash,
            facebook_id: None,
            google_id: None,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
        }))
    }

    /// Look up an account by exact username and match the password against the
    /// stored hash.
    ///
    /// # Errors
    /// Returns an error only on storage failure or a corrupt stored hash;
    /// lookup misses and mismatches are [`VerifyOutcome::InvalidCredentials`].
    pub async fn verify(&self, username: &str, password: &str) -> Result<VerifyOutcome> {
        let Some(account) = self.fetch_by_username(username).await? else {
            return Ok(VerifyOutcome::InvalidCredentials);
        };

        if password::verify(password, &account.password_hash)? {
            Ok(VerifyOutcome::Verified(account))
        } else {
            Ok(VerifyOutcome::InvalidCredentials)
        }
    }

    /// Whether an account with this username exists.
    ///
    /// Never fails: any underlying lookup failure is logged and reported as
    /// `false`.
    pub async fn exists(&self, username: &str) -> bool {
        let query = "SELECT 1 FROM accounts WHERE username = $1 LIMIT 1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        match sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
        {
            Ok(row) => row.is_some(),
            Err(err) => {
                warn!("Failed to check username existence: {err}");
                false
            }
        }
    }

    async fn fetch_by_username(&self, username: &str) -> Result<Option<Account>> {
        let query = r"
            SELECT id, username, password_hash, facebook_id, google_id,
                   first_name, last_name, email
            FROM accounts
            WHERE username = $1
            LIMIT 1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup account")?;

        Ok(row.map(|row| Account {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
            facebook_id: row.get("facebook_id"),
            google_id: row.get("google_id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
        }))
    }
}
