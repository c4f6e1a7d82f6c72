//! CrowdCount CLI - Local account management.
//!
//! # Usage
//!
//! ```bash
//! # Register and log in a new account
//! cc-cli register -u alice -e alice@example.com -p secret1 -c secret1
//!
//! # Log in
//! cc-cli login -e alice@example.com -p secret1
//!
//! # Show the logged-in account
//! cc-cli whoami
//!
//! # Log out
//! cc-cli logout
//! ```
//!
//! State is kept in `CROWDCOUNT_DATA_DIR` (default `.crowdcount`), or the
//! directory given with `--data-dir`. See `crowdcount_auth::config` for the
//! remaining environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crowdcount_auth::config::{AuthConfig, LogFormat};
use crowdcount_auth::state::AppState;

mod commands;

use commands::auth::{CliError, Outcome};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "crowdcount_auth=info,crowdcount_cli=info";

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "CrowdCount account tools")]
struct Cli {
    /// Directory holding account and session data (overrides `CROWDCOUNT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log it in
    Register {
        /// Username (at least 3 characters)
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,

        /// Password again
        #[arg(short = 'c', long = "confirm")]
        confirm_password: String,
    },
    /// Log in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out the current account
    Logout,
    /// Show the logged-in account
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report(&CliError::from(e)),
    };

    init_tracing(config.log_format);

    match run(cli, config).await {
        Ok(outcome) => {
            render(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn run(cli: Cli, mut config: AuthConfig) -> Result<Outcome, CliError> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let mut state = AppState::open(&config)?;
    let latency = config.simulated_latency;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            commands::auth::register(
                &mut state,
                latency,
                &username,
                &email,
                &password,
                &confirm_password,
            )
            .await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&mut state, latency, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&mut state),
        Commands::Whoami => Ok(commands::auth::whoami(&state)),
    }
}

/// Initialize tracing on stderr, leaving stdout for command output.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[allow(clippy::print_stdout)]
fn render(outcome: &Outcome) {
    println!("{outcome}");
}

#[allow(clippy::print_stderr)]
fn report(error: &CliError) -> ExitCode {
    if matches!(error, CliError::Auth(e) if e.is_user_error()) {
        eprintln!("{error}");
    } else {
        tracing::error!(error = %error, "Command failed");
        eprintln!("error: {error}");
    }
    ExitCode::from(error.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        for target in ["crowdcount_auth=info", "crowdcount_cli=info"] {
            assert!(DEFAULT_LOG_FILTER.split(',').any(|d| d == target));
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
