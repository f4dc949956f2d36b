// Job listing scraper: one settings file in, one scrape pass, one CSV out.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobscrape::config::Settings;
use jobscrape::config::settings::SETTINGS_PATH;
use jobscrape::store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load(SETTINGS_PATH)?;
    let config = settings.into_config()?;
    info!("Scraping {}", config.target_url());

    let records = jobscrape::scrape_jobs(&config).await?;
    info!("Scraped {} records", records.len());

    store::save(&records, config.output_path())?;
    Ok(())
}
