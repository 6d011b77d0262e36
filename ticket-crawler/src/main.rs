use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ticket_crawler::config::CrawlConfig;
use ticket_crawler::crawl::{CrawlError, crawl};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "crawl failed");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> Result<(), CrawlError> {
    let config = CrawlConfig::from_env()?;
    info!(
        from = %config.from_station,
        to = %config.to_station,
        date = %config.date,
        stops = config.fetch_stops,
        "starting crawl"
    );

    let summary = crawl(&config).await?;
    info!(
        stations = summary.stations,
        trains = summary.trains,
        stop_lists = summary.stop_lists,
        statements = summary.statements,
        "SQL file generated: {}",
        summary.output.display()
    );
    Ok(())
}
