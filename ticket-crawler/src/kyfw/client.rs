//! 12306 HTTP client.
//!
//! Every query comes in two forms: a `try_*` method returning the error, and
//! a degrading method that logs the error and hands back an empty
//! collection. The crawl uses the degrading forms so one failed request
//! never aborts a run.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{InternalTrainId, Stop, Train};
use crate::stations::StationDirectory;

use super::error::FetchError;
use super::parse::{parse_station_directory, parse_train_records, preview};
use super::transport::{HttpTransport, Query, RawResponse, Transport};
use super::types::{LeftTicketResponse, StopsResponse};

/// Default base URL for the 12306 site.
pub const DEFAULT_BASE_URL: &str = "https://kyfw.12306.cn";

const STATION_NAMES_PATH: &str = "/otn/resources/js/framework/station_name.js";
const STATION_VERSION: &str = "1.9001";
const LEFT_TICKET_PATH: &str = "/otn/leftTicket/query";
const TRAIN_STOPS_PATH: &str = "/otn/czxx/queryByTrainNo";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_REFERER: &str = "https://kyfw.12306.cn/otn/leftTicket/init";

/// Configuration for the 12306 client.
#[derive(Debug, Clone)]
pub struct KyfwConfig {
    /// Base URL (defaults to the production site)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Referer header; the query endpoints reject requests without one
    pub referer: String,
}

impl KyfwConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the Referer header.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }
}

impl Default for KyfwConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the 12306 query endpoints.
#[derive(Debug, Clone)]
pub struct KyfwClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl KyfwClient<HttpTransport> {
    /// Create a client backed by a real HTTP transport.
    pub fn new(config: KyfwConfig) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config.base_url))
    }
}

impl<T: Transport> KyfwClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path` under the base URL.
    async fn get(&self, path: &str, query: &Query<'_>) -> Result<RawResponse, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        self.transport.get(&url, query).await
    }

    /// GET and insist on a 200.
    async fn get_ok(&self, path: &str, query: &Query<'_>) -> Result<String, FetchError> {
        let RawResponse { status, body } = self.get(path, query).await?;
        if status != 200 {
            debug!(status, body = preview(&body), "non-200 response");
            return Err(FetchError::Status { status });
        }
        Ok(body)
    }

    /// Fetch and parse the full station directory.
    pub async fn try_stations(&self) -> Result<StationDirectory, FetchError> {
        let body = self
            .get_ok(STATION_NAMES_PATH, &[("station_version", STATION_VERSION)])
            .await?;
        Ok(parse_station_directory(&body))
    }

    /// Fetch the station directory, or an empty one on failure.
    pub async fn stations(&self) -> StationDirectory {
        self.try_stations().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to fetch stations");
            StationDirectory::new()
        })
    }

    /// Query trains between two named stations on a date.
    ///
    /// Both names must be in `directory` with a non-empty telecode;
    /// otherwise no request is made.
    pub async fn try_trains(
        &self,
        from_station: &str,
        to_station: &str,
        date: NaiveDate,
        directory: &StationDirectory,
    ) -> Result<Vec<Train>, FetchError> {
        let telecode = |name: &str| {
            directory
                .telecode(name)
                .filter(|code| !code.is_empty())
                .ok_or_else(|| FetchError::UnknownStation(name.to_string()))
        };
        let from = telecode(from_station)?;
        let to = telecode(to_station)?;
        let date = date.format("%Y-%m-%d").to_string();

        let query = [
            ("leftTicketDTO.train_date", date.as_str()),
            ("leftTicketDTO.from_station", from.as_str()),
            ("leftTicketDTO.to_station", to.as_str()),
            ("purpose_codes", "ADULT"),
        ];
        let RawResponse { status, body } = self.get(LEFT_TICKET_PATH, &query).await?;
        info!(status, body = preview(&body), "train query response");

        if status != 200 {
            return Err(FetchError::Status { status });
        }

        let response: LeftTicketResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Json {
                message: e.to_string(),
            })?;

        let records = response
            .data
            .and_then(|data| data.result)
            .ok_or(FetchError::MissingData("data.result"))?;

        Ok(parse_train_records(&records))
    }

    /// Query trains, or an empty list on failure.
    pub async fn trains(
        &self,
        from_station: &str,
        to_station: &str,
        date: NaiveDate,
        directory: &StationDirectory,
    ) -> Vec<Train> {
        self.try_trains(from_station, to_station, date, directory)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, from_station, to_station, "failed to fetch trains");
                Vec::new()
            })
    }

    /// Fetch the ordered stops of one train.
    pub async fn try_stops(
        &self,
        train: &InternalTrainId,
        date: NaiveDate,
    ) -> Result<Vec<Stop>, FetchError> {
        let date = date.format("%Y-%m-%d").to_string();
        let query = [
            ("train_no", train.as_str()),
            ("leftTicketDTO.train_date", date.as_str()),
            ("rand_code", ""),
        ];
        let body = self.get_ok(TRAIN_STOPS_PATH, &query).await?;

        let response: StopsResponse = serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
        })?;

        let stops = response
            .data
            .and_then(|data| data.data)
            .filter(|stops| !stops.is_empty())
            .ok_or(FetchError::MissingData("data.data"))?;

        Ok(stops.into_iter().map(Stop::from).collect())
    }

    /// Fetch stops, or an empty list on failure.
    pub async fn stops(&self, train: &InternalTrainId, date: NaiveDate) -> Vec<Stop> {
        self.try_stops(train, date).await.unwrap_or_else(|e| {
            warn!(error = %e, train = %train, "failed to fetch stops");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyfw::mock::MockTransport;

    const STATIONS_JS: &str = "var station_names ='@bjb|北京北|VAP|beijingbei|bjb|北京\
                               @sha|上海|SHH|shanghai|sh|上海';";

    const TRAINS_JSON: &str = r#"{"data": {"result": [
        "s|预订|24000000G10I|G1|VAP|SHH|VAP|SHH|08:00|12:00|04:00|Y",
        "short|record"
    ]}}"#;

    const STOPS_JSON: &str = r#"{"data": {"data": [
        {"station_name": "北京北", "arrive_time": "----", "start_time": "08:00",
         "stopover_time": "----", "station_no": "01"},
        {"station_name": "上海", "arrive_time": "12:00", "start_time": "12:00",
         "stopover_time": "----", "station_no": "02"}
    ]}}"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn client(transport: MockTransport) -> KyfwClient<MockTransport> {
        KyfwClient::with_transport(transport, "http://mock/")
    }

    async fn directory() -> StationDirectory {
        client(MockTransport::new().with_route("station_name.js", 200, STATIONS_JS))
            .stations()
            .await
    }

    #[test]
    fn config_builder() {
        let config = KyfwConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(60)
            .with_referer("http://localhost/");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.referer, "http://localhost/");
    }

    #[test]
    fn config_defaults() {
        let config = KyfwConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.referer, DEFAULT_REFERER);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn client_creation() {
        assert!(KyfwClient::new(KyfwConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn fetch_stations() {
        let directory = directory().await;
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.telecode("北京北").unwrap().as_str(), "VAP");
    }

    #[tokio::test]
    async fn station_request_url() {
        let client = client(MockTransport::new().with_route("station_name.js", 200, STATIONS_JS));
        client.stations().await;

        assert_eq!(
            client.transport().requests().await,
            vec!["http://mock/otn/resources/js/framework/station_name.js?station_version=1.9001"]
        );
    }

    #[tokio::test]
    async fn stations_non_200_is_empty() {
        let client = client(MockTransport::new().with_route("station_name.js", 500, "oops"));

        assert!(matches!(
            client.try_stations().await,
            Err(FetchError::Status { status: 500 })
        ));
        assert!(client.stations().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_trains() {
        let directory = directory().await;
        let transport = MockTransport::new().with_route("leftTicket/query", 200, TRAINS_JSON);
        let client = client(transport);

        let trains = client.trains("北京北", "上海", date(), &directory).await;
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].train_number, "G1");
        assert_eq!(trains[0].internal_id.as_ref().unwrap().as_str(), "24000000G10I");

        let requests = client.transport().requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            "http://mock/otn/leftTicket/query?leftTicketDTO.train_date=2026-10-20\
             &leftTicketDTO.from_station=VAP&leftTicketDTO.to_station=SHH&purpose_codes=ADULT"
        );
    }

    #[tokio::test]
    async fn unknown_station_makes_no_request() {
        let directory = directory().await;
        let client = client(MockTransport::new().with_route("leftTicket/query", 200, TRAINS_JSON));

        let result = client.try_trains("广州", "上海", date(), &directory).await;
        assert!(matches!(result, Err(FetchError::UnknownStation(name)) if name == "广州"));

        assert!(client.trains("北京北", "广州", date(), &directory).await.is_empty());
        assert!(client.transport().requests().await.is_empty());
    }

    #[tokio::test]
    async fn empty_telecode_makes_no_request() {
        let transport = MockTransport::new()
            .with_route("station_name.js", 200, "@a|北京北||x|y|北京@b|上海|SHH|x|y|上海")
            .with_route("leftTicket/query", 200, TRAINS_JSON);
        let client = client(transport);
        let directory = client.stations().await;
        assert_eq!(directory.len(), 2);

        let result = client.try_trains("北京北", "上海", date(), &directory).await;
        assert!(matches!(result, Err(FetchError::UnknownStation(name)) if name == "北京北"));

        let requests = client.transport().requests().await;
        assert!(requests.iter().all(|url| !url.contains("leftTicket/query")));
    }

    #[tokio::test]
    async fn query_parameters_are_encoded() {
        let transport = MockTransport::new()
            .with_route("station_name.js", 200, "@a|甲|A&B|x|y|甲@b|乙|C#D|x|y|乙")
            .with_route("leftTicket/query", 200, TRAINS_JSON);
        let client = client(transport);
        let directory = client.stations().await;

        let trains = client.trains("甲", "乙", date(), &directory).await;
        assert_eq!(trains.len(), 1);

        let requests = client.transport().requests().await;
        assert_eq!(
            requests[1],
            "http://mock/otn/leftTicket/query?leftTicketDTO.train_date=2026-10-20\
             &leftTicketDTO.from_station=A%26B&leftTicketDTO.to_station=C%23D&purpose_codes=ADULT"
        );
    }

    #[tokio::test]
    async fn trains_failures_are_empty() {
        let directory = directory().await;

        for (status, body) in [
            (302, ""),
            (200, "<html>error</html>"),
            (200, r#"{"status": false}"#),
            (200, r#"{"data": {"flag": "1"}}"#),
        ] {
            let client =
                client(MockTransport::new().with_route("leftTicket/query", status, body));
            assert!(
                client.trains("北京北", "上海", date(), &directory).await.is_empty(),
                "status {status} body {body:?}"
            );
        }
    }

    #[tokio::test]
    async fn fetch_stops() {
        let client = client(MockTransport::new().with_route("queryByTrainNo", 200, STOPS_JSON));
        let id = InternalTrainId::parse("24000000G10I").unwrap();

        let stops = client.stops(&id, date()).await;
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].station_name, "北京北");
        assert_eq!(stops[1].arrival_time, "12:00");
        assert_eq!(stops[1].sequence_number, "02");

        let requests = client.transport().requests().await;
        assert_eq!(
            requests[0],
            "http://mock/otn/czxx/queryByTrainNo?train_no=24000000G10I\
             &leftTicketDTO.train_date=2026-10-20&rand_code="
        );
    }

    #[tokio::test]
    async fn stops_failures_are_empty() {
        let id = InternalTrainId::parse("24000000G10I").unwrap();

        for (status, body) in [
            (404, ""),
            (200, "not json"),
            (200, r#"{"data": {}}"#),
            (200, r#"{"data": {"data": []}}"#),
            (200, r#"{"data": {"data": [{"station_name": "x"}]}}"#),
        ] {
            let client = client(MockTransport::new().with_route("queryByTrainNo", status, body));
            assert!(
                client.stops(&id, date()).await.is_empty(),
                "status {status} body {body:?}"
            );
        }
    }
}
