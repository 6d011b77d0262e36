//! References from trains to station rows.

/// How a train endpoint maps onto a row of the `stations` table.
///
/// Trains only carry telecodes, while the `trains` table wants station row
/// ids. A telecode that can be traced back to a station name is looked up by
/// name when the SQL runs; anything else stays unresolved and is never
/// replaced by a made-up id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationRef {
    /// Station known by this name in the directory.
    ByName(String),
    /// Telecode with no matching station.
    Unresolved(String),
}

impl StationRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, StationRef::ByName(_))
    }
}
