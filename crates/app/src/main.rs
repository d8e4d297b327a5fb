//! Confeitaria Storefront CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    confeitaria_app::config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
