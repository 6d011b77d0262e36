//! Domain types for the 12306 crawler.
//!
//! These are the in-memory forms of stations, trains and stops after they
//! have been parsed out of the ticketing system's responses. They live only
//! for the duration of a run.

mod reference;
mod station;
mod stop;
mod train;

pub use reference::StationRef;
pub use station::{Station, Telecode};
pub use stop::{Stop, TrainStops};
pub use train::{InternalTrainId, Train, TrainType, parse_duration_minutes};
