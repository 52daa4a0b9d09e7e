//! The network seam: fetch a URL, get back a status code and body bytes.

use std::future::Future;
use std::time::Duration;

use url::Url;

use super::error::ApiError;

/// A response as seen by the client: status plus raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues GET requests on behalf of [`RejseplanenClient`](super::RejseplanenClient).
///
/// Timeouts, redirects and connection handling belong to the implementation.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = Result<TransportResponse, ApiError>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, ApiError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_transport_creation() {
        let transport = HttpTransport::new(Duration::from_secs(5), "rejseplanen-test");
        assert!(transport.is_ok());
    }

    #[test]
    fn response_from_str_body() {
        let response = TransportResponse::new(200, "{}");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{}");
    }
}
