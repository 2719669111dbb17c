//! `tokenward` binary

use clap::Parser;
use tokenward_common::LoggingTransformer;
use tokenward_server::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    LoggingTransformer::init();

    let config = Cli::parse().into_config()?;
    run(config).await?;
    Ok(())
}
