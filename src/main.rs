use std::process::exit;

use rusty_contacts::prelude::run_app;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run_app() {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e.user_notice());
        exit(1);
    }
}
