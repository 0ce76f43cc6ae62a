pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use pbo_core::error::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Pack {
            from,
            to,
            prefix,
            product_version,
            deterministic,
        } => handlers::handle_pack(from, to, prefix, product_version, deterministic),
        Commands::Files { from } => handlers::handle_files(from),
    }
}
