//! 12306 JSON response DTOs.
//!
//! Only the fields the crawler reads are declared; everything else in the
//! payloads is ignored. Envelope fields are `Option` because the service
//! answers throttled or invalid queries with the same shape minus the data.

use serde::Deserialize;

use crate::domain::Stop;

/// Response from `leftTicket/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketResponse {
    pub data: Option<LeftTicketData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketData {
    /// One `|`-delimited record per train.
    pub result: Option<Vec<String>>,
}

/// Response from `czxx/queryByTrainNo`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsResponse {
    pub data: Option<StopsData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopsData {
    pub data: Option<Vec<StopDto>>,
}

/// A single stop as sent by the stop query.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub station_name: String,
    pub arrive_time: String,
    pub start_time: String,
    pub stopover_time: String,
    pub station_no: String,
}

impl From<StopDto> for Stop {
    fn from(dto: StopDto) -> Self {
        Stop {
            station_name: dto.station_name,
            arrival_time: dto.arrive_time,
            departure_time: dto.start_time,
            stopover_time: dto.stopover_time,
            sequence_number: dto.station_no,
        }
    }
}
