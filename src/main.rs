mod cache;
mod config;
mod diff;
mod github;
mod herald;
mod http;
mod logger;
mod notifier;
mod snapshot;
mod twitter;

use anyhow::{Context, Result};
use config::Config;
use herald::CycleOutcome;
use notifier::DryRunPublisher;
use twitter::TwitterClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init()?;

    log::info!("Starting");
    let config = Config::load().await.context("Cannot load config")?;

    let outcome = if config.notifier.dry_run {
        herald::run(&config, DryRunPublisher).await
    } else {
        herald::run(&config, TwitterClient::new(&config.twitter)).await
    };

    match outcome {
        Ok(CycleOutcome::Compared {
            published, failed, ..
        }) if published + failed > 0 => {
            log::info!("Announced {} of {} new pull request(s)", published, published + failed)
        }
        Ok(_) => {}
        Err(err) => log::error!("{:#}", err),
    }

    log::info!("Finished");
    Ok(())
}
