//! HTTP transport seam

use std::time::Duration;

use crate::error::{RemoteError, RemoteResult};

/// A fully described GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer_token: Option<String>,
}

/// Something that can perform a GET and hand back the response body
///
/// [`HttpTransport`] talks to the network; tests substitute canned responses.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> RemoteResult<String>;
}

/// Blocking `reqwest` transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with a request timeout
    pub fn new(timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sheetbridge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &HttpRequest) -> RemoteResult<String> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
