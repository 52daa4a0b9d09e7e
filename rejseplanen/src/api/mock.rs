//! Mock transport for testing without network access.
//!
//! Serves canned responses keyed by endpoint name (the last URL path
//! segment, e.g. `location` or `departureBoard`) and records every URL it
//! was asked for.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use url::Url;

use super::error::ApiError;
use super::transport::{Transport, TransportResponse};

/// Mock transport that serves fixed responses.
///
/// Endpoints without a configured response answer 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: HashMap<String, Result<TransportResponse, String>>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    ///
    /// Expects files named `{endpoint}.json` (e.g. `location.json`,
    /// `departureBoard.json`); each is served with status 200.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            ApiError::Transport(format!("Failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| ApiError::Transport(format!("Failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let endpoint = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| ApiError::Transport(format!("Invalid filename: {path:?}")))?
                .to_string();

            let body = std::fs::read(&path)
                .map_err(|e| ApiError::Transport(format!("Failed to read {path:?}: {e}")))?;

            mock.responses
                .insert(endpoint, Ok(TransportResponse::new(200, body)));
        }

        Ok(mock)
    }

    /// Serve `body` with status 200 for `endpoint`.
    pub fn with_json(self, endpoint: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response(endpoint, TransportResponse::new(200, body))
    }

    pub fn with_response(mut self, endpoint: &str, response: TransportResponse) -> Self {
        self.responses.insert(endpoint.to_string(), Ok(response));
        self
    }

    /// Fail every request to `endpoint` before any response is produced.
    pub fn with_failure(mut self, endpoint: &str, message: &str) -> Self {
        self.responses
            .insert(endpoint.to_string(), Err(message.to_string()));
        self
    }

    /// Number of endpoints with a configured response.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Every URL requested so far, oldest first.
    pub async fn requests(&self) -> Vec<Url> {
        self.requests.lock().await.clone()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, ApiError> {
        self.requests.lock().await.push(url.clone());

        let endpoint = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();

        match self.responses.get(endpoint) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(ApiError::Transport(message.clone())),
            None => Ok(TransportResponse::new(
                404,
                format!("no mock response for {endpoint}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn serves_configured_endpoint() {
        let mock = MockTransport::new().with_json("location", r#"{"LocationList": {}}"#);

        let response = mock
            .get(&url("https://example.test/bin/rest.exe/location?input=x"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"LocationList": {}}"#);
    }

    #[tokio::test]
    async fn unknown_endpoint_is_404() {
        let mock = MockTransport::new();
        let response = mock.get(&url("https://example.test/stopsNearby")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn configured_failure() {
        let mock = MockTransport::new().with_failure("departureBoard", "connection reset");
        let err = mock
            .get(&url("https://example.test/departureBoard?id=1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn records_requests_across_clones() {
        let mock = MockTransport::new();
        let clone = mock.clone();

        let _ = clone.get(&url("https://example.test/location?input=a")).await;
        let _ = mock.get(&url("https://example.test/location?input=b")).await;

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query(), Some("input=a"));
        assert_eq!(requests[1].query(), Some("input=b"));
    }

    #[test]
    fn loads_fixtures_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("location.json"), r#"{"LocationList": {}}"#).unwrap();
        std::fs::write(dir.path().join("departureBoard.json"), r#"{"DepartureBoard": {}}"#)
            .unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let mock = MockTransport::from_dir(dir.path()).unwrap();
        assert_eq!(mock.len(), 2);
        assert!(mock.responses.contains_key("location"));
        assert!(mock.responses.contains_key("departureBoard"));
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockTransport::from_dir(dir.path().join("does-not-exist"));
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
