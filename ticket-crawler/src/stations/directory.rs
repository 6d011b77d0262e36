//! Station name → telecode directory.

use std::collections::HashMap;

use crate::domain::{Station, StationRef, Telecode};

/// Lookup of every station known to the ticketing system.
///
/// Stations are keyed by name. Inserting a name that already exists replaces
/// the entry in place, so iteration order is the order in which names were
/// first seen.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_name: HashMap<String, usize>,
    by_telecode: HashMap<Telecode, usize>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station, replacing any earlier station with the same name.
    ///
    /// Stations with an empty telecode are listed but never reverse-resolved.
    pub fn insert(&mut self, station: Station) {
        let idx = match self.by_name.get(&station.name) {
            Some(&idx) => {
                let old = &self.stations[idx].telecode;
                if self.by_telecode.get(old) == Some(&idx) {
                    self.by_telecode.remove(old);
                }
                idx
            }
            None => {
                let idx = self.stations.len();
                self.by_name.insert(station.name.clone(), idx);
                idx
            }
        };

        if !station.telecode.is_empty() {
            self.by_telecode.insert(station.telecode.clone(), idx);
        }
        if idx == self.stations.len() {
            self.stations.push(station);
        } else {
            self.stations[idx] = station;
        }
    }

    /// Look up a station by name.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.by_name.get(name).map(|&idx| &self.stations[idx])
    }

    /// Telecode for a station name.
    pub fn telecode(&self, name: &str) -> Option<&Telecode> {
        self.get(name).map(|s| &s.telecode)
    }

    /// Reverse lookup by telecode. When two names share a code the most
    /// recently inserted one wins.
    pub fn by_telecode(&self, code: &str) -> Option<&Station> {
        self.by_telecode.get(code).map(|&idx| &self.stations[idx])
    }

    /// Map a train endpoint telecode onto a station reference.
    pub fn resolve(&self, code: &str) -> StationRef {
        match self.by_telecode(code) {
            Some(station) => StationRef::ByName(station.name.clone()),
            None => StationRef::Unresolved(code.to_string()),
        }
    }

    /// Iterate stations in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<Station> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        let mut directory = StationDirectory::new();
        for station in iter {
            directory.insert(station);
        }
        directory
    }
}
