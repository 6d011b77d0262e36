//! Rendering crawled data as `INSERT` statements.

use tracing::{debug, warn};

use crate::domain::{Station, StationRef, Stop, Train, TrainStops};
use crate::stations::StationDirectory;

use super::statement::{Expr, Statement};
use super::value::SqlValue;

/// Render stations and trains as newline-joined `INSERT` statements.
///
/// Produces one line per station (directory order) followed by one line per
/// train (list order). Stop lists are accepted but not rendered here; see
/// [`render_stop_sql`].
pub fn generate_sql(
    directory: &StationDirectory,
    trains: &[Train],
    stops: &[TrainStops],
) -> String {
    if !stops.is_empty() {
        debug!(stop_lists = stops.len(), "stop lists are not part of generate_sql output");
    }

    let stations = directory.iter().map(station_statement);
    let trains = trains.iter().map(|t| train_statement(t, directory));

    stations
        .chain(trains)
        .map(|stmt| stmt.render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `INSERT INTO stations` for one station.
pub fn station_statement(station: &Station) -> Statement {
    Statement::insert(
        "stations",
        vec![
            ("station_name", Expr::value(station.name.as_str())),
            ("city", Expr::value(station.city.as_str())),
        ],
    )
}

/// `INSERT INTO trains` for one train.
///
/// Endpoint station ids are looked up by name at insert time. Endpoints,
/// train types and durations that cannot be determined are written as
/// `NULL` rather than guessed.
pub fn train_statement(train: &Train, directory: &StationDirectory) -> Statement {
    let start = directory.resolve(&train.start_station_telecode);
    let end = directory.resolve(&train.end_station_telecode);

    let endpoints = [
        (&start, &train.start_station_telecode),
        (&end, &train.end_station_telecode),
    ];
    for (endpoint, code) in endpoints {
        if !endpoint.is_resolved() {
            warn!(
                train = %train.train_number,
                telecode = %code,
                "station telecode not in directory; station id left NULL"
            );
        }
    }

    Statement::insert(
        "trains",
        vec![
            ("train_number", Expr::value(train.train_number.as_str())),
            (
                "train_type",
                Expr::value(train.train_type().map(|t| t.code())),
            ),
            ("start_station_id", station_id(start)),
            ("end_station_id", station_id(end)),
            ("departure_time", Expr::value(train.departure_time.as_str())),
            ("arrival_time", Expr::value(train.arrival_time.as_str())),
            ("duration_minutes", Expr::value(train.duration_minutes())),
        ],
    )
}

fn station_id(station: StationRef) -> Expr {
    match station {
        StationRef::ByName(name) => station_lookup(name),
        StationRef::Unresolved(_) => Expr::value(None::<u32>),
    }
}

fn station_lookup(name: impl Into<String>) -> Expr {
    Expr::Lookup {
        table: "stations",
        id_column: "station_id",
        key_column: "station_name",
        key: SqlValue::Text(name.into()),
    }
}

/// `INSERT INTO train_stops` rows for every stop of every train.
pub fn stop_statements(stops: &[TrainStops]) -> Vec<Statement> {
    stops
        .iter()
        .flat_map(|train| {
            train
                .stops
                .iter()
                .map(move |stop| stop_statement(&train.train_number, stop))
        })
        .collect()
}

/// `INSERT INTO train_stops` for one stop of a train.
pub fn stop_statement(train_number: &str, stop: &Stop) -> Statement {
    Statement::insert(
        "train_stops",
        vec![
            (
                "train_id",
                Expr::Lookup {
                    table: "trains",
                    id_column: "train_id",
                    key_column: "train_number",
                    key: train_number.into(),
                },
            ),
            ("station_id", station_lookup(stop.station_name.as_str())),
            ("sequence_number", Expr::value(stop.sequence())),
            ("arrival_time", Expr::value(stop.arrival())),
            ("departure_time", Expr::value(stop.departure())),
            ("stop_minutes", Expr::value(stop.stop_minutes())),
        ],
    )
}

/// Render stop lists as newline-joined `INSERT INTO train_stops` statements.
pub fn render_stop_sql(stops: &[TrainStops]) -> String {
    stop_statements(stops)
        .iter()
        .map(Statement::render)
        .collect::<Vec<_>>()
        .join("\n")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Telecode;
    use proptest::prelude::*;

    proptest! {
        /// N stations and M trains give exactly N + M non-empty lines
        #[test]
        fn line_count(
            names in proptest::collection::hash_set("[a-z']{1,8}", 0..20),
            train_count in 0usize..20,
        ) {
            let directory: StationDirectory = names
                .iter()
                .enumerate()
                .map(|(i, name)| Station {
                    name: name.clone(),
                    telecode: Telecode::new(format!("T{i}")),
                    city: name.clone(),
                })
                .collect();

            let trains: Vec<Train> = (0..train_count)
                .map(|i| Train {
                    train_number: format!("G{i}"),
                    internal_id: None,
                    start_station_telecode: "T0".to_string(),
                    end_station_telecode: "T1".to_string(),
                    departure_time: "08:00".to_string(),
                    arrival_time: "12:00".to_string(),
                    duration_raw: "04:00".to_string(),
                })
                .collect();

            let sql = generate_sql(&directory, &trains, &[]);
            let expected = names.len() + train_count;
            if expected == 0 {
                prop_assert_eq!(sql, "");
            } else {
                let lines: Vec<&str> = sql.split('\n').collect();
                prop_assert_eq!(lines.len(), expected);
                prop_assert!(lines.iter().all(|l| l.starts_with("INSERT INTO ")));
            }
        }
    }
}
