use anyhow::Result;
use clap::Parser;

use blogforge_rs::cli::Args;
use blogforge_rs::launch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.into_config();

    launch(config).await?;
    Ok(())
}
