//! Tally Application CLI

use std::{io, process};

use tally_app::{
    cli::{self, Cli},
    context::AppContext,
    observability,
};
use tracing::error;

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    let ctx = match AppContext::from_config(&cli.catalog) {
        Ok(ctx) => ctx,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error:#}");
            eprintln!("{init_error}");
            process::exit(1);
        }
    };

    if let Err(run_error) = cli::run(&cli.command, &ctx, &mut io::stdout().lock()).await {
        error!("command failed: {run_error:#}");
        eprintln!("{run_error:#}");
        process::exit(1);
    }
}
