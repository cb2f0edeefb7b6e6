use std::io;

use clap::Parser;
use teller::bank::Bank;
use teller::config::{CliArgs, Config, LoggingConfig};
use teller::session::Session;
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);
    init_logging(&config.logging);

    tracing::info!(
        savings_minimum_balance = %config.accounts.savings_minimum_balance,
        checking_overdraft_limit = %config.accounts.checking_overdraft_limit,
        "Starting teller session"
    );

    let stdin = io::stdin();
    let mut session = Session::new(Bank::new(), config.accounts, stdin.lock(), io::stdout());
    if let Err(e) = session.run() {
        tracing::error!(error = %e, "Session failed");
        std::process::exit(1);
    }
}
