//! One crawl run: stations → trains → stops → SQL file.
//!
//! Fetch failures never abort the run; they arrive here as empty
//! collections and simply produce fewer statements. Only failing to write
//! the output file is reported as an error.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::{ConfigError, CrawlConfig};
use crate::domain::{Train, TrainStops};
use crate::kyfw::{FetchError, KyfwClient, Transport};
use crate::sql::{generate_sql, render_stop_sql};

/// Errors that end a crawl run.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error(transparent)]
    Client(#[from] FetchError),

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub stations: usize,
    pub trains: usize,
    /// Trains whose stop lists were fetched.
    pub stop_lists: usize,
    /// Lines written to the output file.
    pub statements: usize,
    pub output: PathBuf,
}

/// Build a real HTTP client from `config` and run the crawl.
pub async fn crawl(config: &CrawlConfig) -> Result<CrawlSummary, CrawlError> {
    let client = KyfwClient::new(config.kyfw.clone())?;
    run(config, &client).await
}

/// Run the crawl with the given client.
pub async fn run<T: Transport>(
    config: &CrawlConfig,
    client: &KyfwClient<T>,
) -> Result<CrawlSummary, CrawlError> {
    let directory = client.stations().await;
    info!(count = directory.len(), "found stations");

    let trains = client
        .trains(
            &config.from_station,
            &config.to_station,
            config.date,
            &directory,
        )
        .await;
    info!(
        count = trains.len(),
        from = %config.from_station,
        to = %config.to_station,
        date = %config.date,
        "found trains"
    );

    let stops = if config.fetch_stops {
        fetch_stops(client, &trains, config.date).await
    } else {
        if !trains.is_empty() {
            info!("skipping stops; set CRAWL_WITH_STOPS=1 to fetch them");
        }
        Vec::new()
    };

    let mut sql = generate_sql(&directory, &trains, &stops);
    let stop_sql = render_stop_sql(&stops);
    if !stop_sql.is_empty() {
        if !sql.is_empty() {
            sql.push('\n');
        }
        sql.push_str(&stop_sql);
    }

    std::fs::write(&config.output, &sql).map_err(|source| CrawlError::Write {
        path: config.output.clone(),
        source,
    })?;

    Ok(CrawlSummary {
        stations: directory.len(),
        trains: trains.len(),
        stop_lists: stops.len(),
        statements: sql.lines().count(),
        output: config.output.clone(),
    })
}

/// Fetch stop lists one train at a time.
///
/// Trains without an internal identifier cannot be queried and are skipped,
/// as are trains whose stop query comes back empty.
async fn fetch_stops<T: Transport>(
    client: &KyfwClient<T>,
    trains: &[Train],
    date: NaiveDate,
) -> Vec<TrainStops> {
    let mut all = Vec::new();

    for train in trains {
        let Some(internal_id) = &train.internal_id else {
            debug!(train = %train.train_number, "no internal id; skipping stops");
            continue;
        };

        let stops = client.stops(internal_id, date).await;
        debug!(train = %train.train_number, count = stops.len(), "fetched stops");
        if stops.is_empty() {
            continue;
        }

        all.push(TrainStops {
            train_number: train.train_number.clone(),
            stops,
        });
    }

    info!(count = all.len(), "fetched stop lists");
    all
}
