mod cli;
mod dialect;
mod error;
mod importer;
mod models;
mod normalizer;
mod scanner;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_logging(verbose: bool) {
    let default = if verbose { "stmtfix=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = cli::standardize::run(
        &cli.file,
        cli.output.as_deref(),
        cli.profile,
        cli.format.as_deref(),
    );

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
