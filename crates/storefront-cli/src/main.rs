//! storefront - CLI tool for the storefront API.
//!
//! A thin wrapper over `storefront-http` for exercising the API from a
//! terminal. The session cookies are persisted between runs, so an expired
//! session is renewed transparently the same way the library does it.

mod cli;
mod commands;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use storefront_core::Error;
use storefront_core::error::AuthError;

use cli::Cli;

/// Exit status when the user has to log in again.
const EXIT_LOGIN_REQUIRED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match commands::handle(cli.command, cli.api.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err);
            exit_code(&err)
        }
    }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    let login_required = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(|cause| {
            cause.is_renewal_denied() || matches!(cause, Error::Auth(AuthError::NoSession))
        });

    if login_required {
        ExitCode::from(EXIT_LOGIN_REQUIRED)
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
