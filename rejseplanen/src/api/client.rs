//! Rejseplanen HTTP client.
//!
//! Provides async methods for the location search, nearby-stop and
//! departure board services. Each call issues one GET request, checks the
//! status, unwraps the response envelope and hands it to `convert`.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::{
    BoardType, Coordinate, DepartureBoard, LocationResult, ProductCategory, Stop, encode_products,
};

use super::convert::{convert_departure_board, convert_location_list};
use super::error::ApiError;
use super::transport::{HttpTransport, Transport};
use super::types::{DEPARTURE_BOARD_KEY, LOCATION_LIST_KEY};

/// Default base URL for the Rejseplanen REST API.
///
/// The trailing slash matters: endpoint names are joined onto it.
pub const DEFAULT_BASE_URL: &str = "https://xmlopen.rejseplanen.dk/bin/rest.exe/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("rejseplanen/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Rejseplanen client.
#[derive(Debug, Clone)]
pub struct RejseplanenConfig {
    /// Base URL for the API (defaults to the public endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl RejseplanenConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
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

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for RejseplanenConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of a nearby-stop search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub coordinate: Coordinate,
    /// Search radius in metres.
    pub max_radius: Option<u32>,
    /// Upper bound on the number of stops. The public API does not always
    /// honour it.
    pub max_count: Option<u32>,
    /// Only include stops served by these products.
    pub products: Option<Vec<ProductCategory>>,
}

impl NearbyQuery {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            max_radius: None,
            max_count: None,
            products: None,
        }
    }

    pub fn with_max_radius(mut self, metres: u32) -> Self {
        self.max_radius = Some(metres);
        self
    }

    pub fn with_max_count(mut self, count: u32) -> Self {
        self.max_count = Some(count);
        self
    }

    pub fn with_products(mut self, products: &[ProductCategory]) -> Self {
        self.products = Some(products.to_vec());
        self
    }
}

/// Rejseplanen API client.
///
/// Generic over the [`Transport`] so tests can serve canned responses.
#[derive(Debug, Clone)]
pub struct RejseplanenClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
}

impl RejseplanenClient<HttpTransport> {
    /// Create a client that talks HTTP using the given configuration.
    pub fn new(config: RejseplanenConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )?;
        Self::with_transport(transport, &config.base_url)
    }
}

impl<T: Transport> RejseplanenClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            transport,
            base_url,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search for stops, addresses and points of interest matching `query`.
    #[instrument(skip(self))]
    pub async fn location(&self, query: &str) -> Result<LocationResult, ApiError> {
        let url = self.location_url(query)?;
        let list = self.fetch_envelope(&url, LOCATION_LIST_KEY).await?;

        let result = convert_location_list(&list)?;

        debug!(
            stops = result.stops.len(),
            addresses = result.addresses.len(),
            points_of_interest = result.points_of_interest.len(),
            "Locations found"
        );
        Ok(result)
    }

    /// Find stops near a coordinate.
    #[instrument(skip(self))]
    pub async fn stops_nearby(&self, query: &NearbyQuery) -> Result<Vec<Stop>, ApiError> {
        let url = self.stops_nearby_url(query)?;
        let list = self.fetch_envelope(&url, LOCATION_LIST_KEY).await?;

        let stops = convert_location_list(&list)?.stops;

        debug!(count = stops.len(), "Nearby stops found");
        Ok(stops)
    }

    /// Fetch the departure board for `stop`, limited to `board_type`.
    ///
    /// The returned board is stamped with `stop` and `board_type` as given.
    #[instrument(skip(self, stop), fields(stop_id = stop.id()))]
    pub async fn departure_board(
        &self,
        board_type: BoardType,
        stop: &Stop,
    ) -> Result<DepartureBoard, ApiError> {
        let url = self.departure_board_url(board_type, stop)?;
        let board = self.fetch_envelope(&url, DEPARTURE_BOARD_KEY).await?;

        let unstamped = convert_departure_board(&board)?;

        debug!(count = unstamped.departures().len(), "Departures found");
        Ok(unstamped.stamp(stop.clone(), board_type))
    }

    pub(crate) fn location_url(&self, query: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.join("location")?;
        url.query_pairs_mut()
            .append_pair("input", query)
            .append_pair("format", "json");
        Ok(url)
    }

    pub(crate) fn stops_nearby_url(&self, query: &NearbyQuery) -> Result<Url, ApiError> {
        if !query.coordinate.is_finite() {
            return Err(ApiError::InvalidCoordinate(query.coordinate));
        }

        let mut url = self.base_url.join("stopsNearby")?;
        let (x, y) = query.coordinate.to_micro_degrees();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("coordX", &x.to_string())
                .append_pair("coordY", &y.to_string());
            if let Some(radius) = query.max_radius {
                pairs.append_pair("maxRadius", &radius.to_string());
            }
            if let Some(count) = query.max_count {
                pairs.append_pair("maxCount", &count.to_string());
            }
            if let Some(products) = &query.products {
                pairs.append_pair("useProduct", &encode_products(products));
            }
            pairs.append_pair("format", "json");
        }
        Ok(url)
    }

    pub(crate) fn departure_board_url(
        &self,
        board_type: BoardType,
        stop: &Stop,
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.join("departureBoard")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("id", stop.id());
            for (key, value) in board_type.query_flags() {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("format", "json");
        }
        Ok(url)
    }

    /// GET `url`, require status 200, parse JSON and return `body[envelope]`.
    async fn fetch_envelope(&self, url: &Url, envelope: &str) -> Result<Value, ApiError> {
        debug!(%url, "Requesting Rejseplanen");

        let response = self.transport.get(url).await?;

        if response.status != 200 {
            return Err(ApiError::Status {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let mut body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::decoding(e.to_string(), &response.body))?;

        match body.get_mut(envelope).map(Value::take) {
            Some(inner @ Value::Object(_)) => Ok(inner),
            Some(_) => Err(ApiError::decoding(
                format!("{envelope} is not an object"),
                &response.body,
            )),
            None => Err(ApiError::decoding(
                format!("missing {envelope}"),
                &response.body,
            )),
        }
    }
}
