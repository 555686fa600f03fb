//! Promisify CLI entry point.

use clap::Parser;
use promisify::cli::{self, Cli, EXIT_ERROR};
use promisify::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match cli::run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
