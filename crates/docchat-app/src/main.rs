use anyhow::Result;
use clap::Parser;

mod cli;
mod logging;
mod repl;
mod surface;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    repl::run_repl_mode(cli).await
}
