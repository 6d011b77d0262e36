//! 12306 (kyfw.12306.cn) client.
//!
//! Three endpoints are used:
//! - the station list, a JavaScript file of `@`/`|`-delimited records
//! - `leftTicket/query`, JSON wrapping `|`-delimited train records
//! - `czxx/queryByTrainNo`, JSON listing the stops of one train
//!
//! Key characteristics of the site:
//! - Requests need a browser-like header set including a Referer
//! - Trains are queried by station telecode, not by name
//! - Stops are queried by the internal `train_no`, not the public number

mod client;
mod error;
pub mod mock;
pub mod parse;
mod transport;
mod types;

pub use client::{DEFAULT_BASE_URL, KyfwClient, KyfwConfig};
pub use error::FetchError;
pub use transport::{HttpTransport, Query, RawResponse, Transport};
pub use types::{LeftTicketData, LeftTicketResponse, StopDto, StopsData, StopsResponse};
