//! Train types.

use std::fmt;

/// A train returned by the left-ticket query.
///
/// Field values are kept exactly as the ticketing system sent them; times
/// and durations are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    /// Public train number (e.g. "G1").
    pub train_number: String,
    /// Internal identifier needed by the stop query, when the record had one.
    pub internal_id: Option<InternalTrainId>,
    /// Telecode of the train's origin station.
    pub start_station_telecode: String,
    /// Telecode of the train's terminus.
    pub end_station_telecode: String,
    /// Departure time, nominally "HH:MM".
    pub departure_time: String,
    /// Arrival time, nominally "HH:MM".
    pub arrival_time: String,
    /// Journey duration as sent, nominally "HH:MM".
    pub duration_raw: String,
}

impl Train {
    /// Train category derived from the train number prefix.
    pub fn train_type(&self) -> Option<TrainType> {
        TrainType::from_train_number(&self.train_number)
    }

    /// Duration in whole minutes, if `duration_raw` is "H:MM" shaped.
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_duration_minutes(&self.duration_raw)
    }
}

/// Parse an "H:MM" duration into minutes.
///
/// Hours may exceed 24; minutes must be below 60.
pub fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    if hours.is_empty() || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Train category, encoded by the leading letter of the train number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainType {
    /// G: high-speed.
    HighSpeed,
    /// D: EMU.
    Emu,
    /// C: intercity.
    Intercity,
    /// Z: direct express.
    Direct,
    /// T: express.
    Express,
    /// K: fast.
    Fast,
}

impl TrainType {
    /// Derive the category from a public train number.
    ///
    /// Returns `None` for purely numeric or unrecognised numbers.
    pub fn from_train_number(train_number: &str) -> Option<Self> {
        match train_number.trim().chars().next()?.to_ascii_uppercase() {
            'G' => Some(TrainType::HighSpeed),
            'D' => Some(TrainType::Emu),
            'C' => Some(TrainType::Intercity),
            'Z' => Some(TrainType::Direct),
            'T' => Some(TrainType::Express),
            'K' => Some(TrainType::Fast),
            _ => None,
        }
    }

    /// Single-letter code stored in the `trains.train_type` column.
    pub fn code(self) -> &'static str {
        match self {
            TrainType::HighSpeed => "G",
            TrainType::Emu => "D",
            TrainType::Intercity => "C",
            TrainType::Direct => "Z",
            TrainType::Express => "T",
            TrainType::Fast => "K",
        }
    }
}

impl fmt::Display for TrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Internal train identifier (`train_no`), e.g. "240000G10104".
///
/// Distinct from the public train number; only this identifier is accepted
/// by the stop query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalTrainId(String);

impl InternalTrainId {
    /// Wrap a raw identifier. Blank input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        (!s.is_empty()).then(|| InternalTrainId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalTrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
