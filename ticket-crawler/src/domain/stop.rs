//! Stop types.

/// Placeholder the ticketing system sends for a missing time.
const NO_TIME: &str = "----";

/// One scheduled station visit within a train's route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub station_name: String,
    /// Arrival time; "----" at the origin.
    pub arrival_time: String,
    /// Departure time; "----" at the terminus.
    pub departure_time: String,
    /// Dwell time as sent, e.g. "2分钟" or "----".
    pub stopover_time: String,
    /// Position in the route as sent, e.g. "01".
    pub sequence_number: String,
}

impl Stop {
    /// Arrival time, unless the source marked it as absent.
    pub fn arrival(&self) -> Option<&str> {
        present(&self.arrival_time)
    }

    /// Departure time, unless the source marked it as absent.
    pub fn departure(&self) -> Option<&str> {
        present(&self.departure_time)
    }

    /// Dwell time in minutes, taken from the leading digits of `stopover_time`.
    pub fn stop_minutes(&self) -> Option<u32> {
        let digits: String = self
            .stopover_time
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Numeric position in the route.
    pub fn sequence(&self) -> Option<u32> {
        self.sequence_number.trim().parse().ok()
    }
}

fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != NO_TIME).then_some(value)
}

/// The ordered stops of one train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainStops {
    /// Public number of the train the stops belong to.
    pub train_number: String,
    pub stops: Vec<Stop>,
}
