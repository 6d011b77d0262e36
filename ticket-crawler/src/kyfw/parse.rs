//! Parsers for the delimited text formats 12306 uses.
//!
//! The station list is a JavaScript file holding one long string of
//! `@`-separated records, and train query results are `|`-delimited strings
//! with positional fields. Records that are too short are skipped without
//! error; nothing here fails.

use crate::domain::{InternalTrainId, Station, Telecode, Train};
use crate::stations::StationDirectory;

/// Minimum number of fields in a station record.
const STATION_MIN_FIELDS: usize = 3;

/// A train record must have more than this many fields.
const TRAIN_MIN_FIELDS_EXCLUSIVE: usize = 10;

/// Characters of a response body included in log previews.
pub const PREVIEW_CHARS: usize = 200;

/// Parse the body of `station_name.js` into a directory.
///
/// The body looks like `var station_names ='@bjb|北京北|VAP|...@...';`.
/// The payload runs from just after the first `@` up to the last `'`.
pub fn parse_station_directory(body: &str) -> StationDirectory {
    let start = body.find('@').map_or(0, |i| i + 1);
    let end = body.rfind('\'').unwrap_or(body.len());
    let payload = body.get(start..end).unwrap_or("");

    payload
        .split('@')
        .filter(|record| !record.is_empty())
        .filter_map(parse_station_record)
        .collect()
}

/// Parse one `|`-delimited station record.
///
/// Field 2 is the name, field 3 the telecode and field 6, when present, the
/// city (1-indexed).
pub fn parse_station_record(record: &str) -> Option<Station> {
    let parts: Vec<&str> = record.split('|').collect();
    if parts.len() < STATION_MIN_FIELDS {
        return None;
    }

    let name = parts[1];
    let telecode = Telecode::new(parts[2]);
    let city = parts
        .get(5)
        .filter(|city| !city.is_empty())
        .copied()
        .unwrap_or(name);

    Some(Station {
        name: name.to_string(),
        telecode,
        city: city.to_string(),
    })
}

/// Parse the `data.result` strings of a left-ticket query.
pub fn parse_train_records<S: AsRef<str>>(records: &[S]) -> Vec<Train> {
    records
        .iter()
        .filter_map(|record| parse_train_record(record.as_ref()))
        .collect()
}

/// Parse one `|`-delimited train record.
///
/// Positions (1-indexed): 3 internal id, 4 train number, 5/6 start and end
/// telecodes, 9 departure, 10 arrival, 11 duration.
pub fn parse_train_record(record: &str) -> Option<Train> {
    let parts: Vec<&str> = record.split('|').collect();
    if parts.len() <= TRAIN_MIN_FIELDS_EXCLUSIVE {
        return None;
    }

    Some(Train {
        train_number: parts[3].to_string(),
        internal_id: InternalTrainId::parse(parts[2]),
        start_station_telecode: parts[4].to_string(),
        end_station_telecode: parts[5].to_string(),
        departure_time: parts[8].to_string(),
        arrival_time: parts[9].to_string(),
        duration_raw: parts[10].to_string(),
    })
}

/// First [`PREVIEW_CHARS`] characters of a body, for logging.
pub fn preview(body: &str) -> &str {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
