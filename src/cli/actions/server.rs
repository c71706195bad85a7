use crate::{api, auth::AccessPolicy};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub token_idle_seconds: u64,
    pub require: Vec<String>,
    pub exempt: Vec<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Fail early on an unparseable DSN instead of at pool connect time.
    Url::parse(&args.dsn).context("invalid database DSN")?;

    let policy = AccessPolicy::new(&args.require, &args.exempt);
    let idle_timeout = Duration::from_secs(args.token_idle_seconds);

    api::new(args.port, &args.dsn, idle_timeout, policy).await
}

#[cfg(test)]
mod tests {
    use super::{execute, Args};

    #[tokio::test]
    async fn execute_rejects_invalid_dsn() {
        let args = Args {
            port: 8080,
            dsn: "not a dsn".to_string(),
            token_idle_seconds: 86400,
            require: vec![],
            exempt: vec![],
        };
        let result = execute(args).await;
        assert!(result.is_err());
        if let Err(err) = result {
            assert!(err.to_string().contains("invalid database DSN"));
        }
    }
}
