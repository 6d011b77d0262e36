//! Station and telecode types.

use std::borrow::Borrow;
use std::fmt;

/// A station telecode as used by the 12306 query endpoints (e.g. `BJP`).
///
/// The ticketing system does not document a fixed format, so the code is
/// kept exactly as the directory lists it. Some records carry an empty
/// code; those stations are still listed but cannot be queried.
///
/// # Examples
///
/// ```
/// use ticket_crawler::domain::Telecode;
///
/// let bjp = Telecode::new("BJP");
/// assert_eq!(bjp.as_str(), "BJP");
/// assert!(!bjp.is_empty());
///
/// assert!(Telecode::new("").is_empty());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Telecode(String);

impl Telecode {
    pub fn new(code: impl Into<String>) -> Self {
        Telecode(code.into())
    }

    /// Returns the telecode as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty code cannot be used in a train query.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for Telecode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Telecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Telecode({})", self.0)
    }
}

impl fmt::Display for Telecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station from the 12306 station directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Human-readable station name (e.g. "北京北").
    pub name: String,
    /// Query code for the station.
    pub telecode: Telecode,
    /// City the station belongs to. Falls back to the station name when
    /// the directory record does not carry one.
    pub city: String,
}
