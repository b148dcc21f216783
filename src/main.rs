use std::process;
use clap::Parser;

use feed_loader::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        eprintln!("Error [{}]: {}", e.error_code(), e);
        if e.is_temporary() {
            eprintln!("This may be temporary; try again later.");
        }
        process::exit(e.exit_code());
    }
}
