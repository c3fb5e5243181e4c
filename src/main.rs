use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authcore::domain::auth::ports::Clock;
use authcore::domain::auth::{Email, LoginAttempt, Password};
use authcore::infrastructure::{Config, SystemClock};

/// Developer tooling for the authentication domain rules
#[derive(Debug, Parser)]
#[command(name = "authcore", version, about)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Validate an email address and show its normalized and masked forms
  CheckEmail { email: String },

  /// Check a password against the strength policy
  CheckPassword {
    password: String,
    /// Confirmation value that must match the password
    #[arg(long)]
    confirm: Option<String>,
  },

  /// Show the lockout state after a number of consecutive failures
  LockoutPreview {
    #[arg(long, default_value_t = LoginAttempt::MAX_FAILED_ATTEMPTS)]
    failures: u32,
  },
}

fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  let config = Config::load().context("Failed to load configuration")?;

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.clone().into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::debug!(?config, "Configuration loaded");

  let cli = Cli::parse();
  match cli.command {
    Command::CheckEmail { email } => {
      let email = Email::create(&email)?;
      println!("normalized: {}", email.unmask());
      println!("masked:     {}", email.mask());
    }
    Command::CheckPassword { password, confirm } => {
      match confirm {
        Some(confirm) => Password::validate_with_confirmation(&password, &confirm)?,
        None => Password::validate(&password)?,
      }
      println!("password satisfies the policy");
    }
    Command::LockoutPreview { failures } => {
      let now = SystemClock.now();
      let attempt =
        (0..failures).fold(LoginAttempt::create(), |acc, _| acc.register_failure(now));

      println!("{}", serde_json::to_string_pretty(&attempt)?);
      match attempt.lock_message(now) {
        Some(message) => println!("{}", message),
        None => println!("account is not locked"),
      }
    }
  }

  Ok(())
}
