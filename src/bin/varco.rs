use anyhow::Result;
use varco::cli::{actions::Action, start, telemetry};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = start()?;

    // Handle the action
    match action {
        Action::Server(args) => varco::cli::actions::server::execute(args).await?,
    }

    telemetry::shutdown_tracer();

    Ok(())
}
