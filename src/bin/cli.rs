// src/bin/cli.rs
use learnset_scrape::cli;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run().await.map_err(|e| color_eyre::eyre::eyre!("{e}"))
}
