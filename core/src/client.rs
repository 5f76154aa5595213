//! Connection configuration and the single request chokepoint.
//!
//! # Design
//! `SpacesClient` owns the tokens, the resolved base URL, the verbosity flag
//! and a `Transport`. Every resource operation goes through `perform`, which
//! is the only place that injects auth headers, talks to the transport and
//! interprets status codes. Setters take `&mut self`, so configuration cannot
//! change while a borrowed client is in the middle of a request.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::environment::Environment;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, Transport, UreqTransport};

const CONTENT_TYPE: &str = "Content-Type";
const APP_TOKEN_HEADER: &str = "X-App-Token";
const USER_TOKEN_HEADER: &str = "X-User-Token";

/// Blocking client for the spaces API.
pub struct SpacesClient<T: Transport = UreqTransport> {
    verbose: bool,
    app_token: String,
    user_token: String,
    environment: Environment,
    base_url: Option<String>,
    transport: T,
}

impl SpacesClient<UreqTransport> {
    /// Client for production with empty tokens and verbose diagnostics on.
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }

    /// Client configured from `config`, including the transport timeout.
    pub fn from_config(config: &ClientConfig) -> Self {
        let transport = match config.timeout() {
            Some(timeout) => UreqTransport::with_timeout(timeout),
            None => UreqTransport::new(),
        };
        let mut client = Self::with_transport(transport);
        client.set_app_token(&config.app_token);
        client.set_user_token(&config.user_token);
        client.set_environment(config.environment, config.server_url.as_deref());
        client.set_verbose(config.verbose);
        client
    }
}

impl Default for SpacesClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> SpacesClient<T> {
    pub fn with_transport(transport: T) -> Self {
        let environment = Environment::default();
        Self {
            verbose: true,
            app_token: String::new(),
            user_token: String::new(),
            environment,
            base_url: environment.server_url().map(str::to_string),
            transport,
        }
    }

    pub fn set_app_token(&mut self, token: &str) {
        self.app_token = token.to_string();
    }

    pub fn set_user_token(&mut self, token: &str) {
        self.user_token = token.to_string();
    }

    /// Select the service environment. `url` overrides the environment's
    /// own base URL when given.
    pub fn set_environment(&mut self, environment: Environment, url: Option<&str>) {
        self.environment = environment;
        self.base_url = match url {
            Some(url) => Some(url.trim_end_matches('/').to_string()),
            None => environment.server_url().map(str::to_string),
        };
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn app_token(&self) -> &str {
        &self.app_token
    }

    pub fn user_token(&self) -> &str {
        &self.user_token
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Resolved base URL, `None` for an environment without an endpoint.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request to `path` and decode the 2xx body into `R`.
    ///
    /// Fails with `MissingAppToken` or `MissingServerUrl` before any network
    /// activity, with `Network` when no response arrives, with `Status` for
    /// anything outside 200..=299, and with `Decode` when the body does not
    /// match `R`.
    #[instrument(skip(self, method, body), fields(method = method.as_str()))]
    pub fn perform<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<R> {
        if self.app_token.is_empty() {
            return Err(ApiError::MissingAppToken);
        }
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(ApiError::MissingServerUrl(self.environment))?;

        let request = HttpRequest {
            method,
            url: format!("{base_url}{path}"),
            headers: self.headers(),
            body,
        };
        if self.verbose {
            log_request(&request);
        }

        let response = self.transport.execute(&request)?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            if self.verbose {
                warn!(
                    status = response.status,
                    body = %String::from_utf8_lossy(&response.body),
                    "response body does not match the expected shape"
                );
            }
            ApiError::Decode(e)
        })
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            (CONTENT_TYPE.to_string(), "application/json".to_string()),
            (APP_TOKEN_HEADER.to_string(), self.app_token.clone()),
        ];
        if !self.user_token.is_empty() {
            headers.push((USER_TOKEN_HEADER.to_string(), self.user_token.clone()));
        }
        headers
    }
}

impl<T: Transport> fmt::Debug for SpacesClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpacesClient")
            .field("verbose", &self.verbose)
            .field("app_token", &redact(&self.app_token))
            .field("user_token", &redact(&self.user_token))
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn redact(token: &str) -> &'static str {
    if token.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

fn log_request(request: &HttpRequest) {
    let body = request
        .body
        .as_deref()
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    debug!(method = request.method.as_str(), url = %request.url, body = %body, "request");
    for (key, value) in &request.headers {
        let value = if key == APP_TOKEN_HEADER || key == USER_TOKEN_HEADER {
            redact(value)
        } else {
            value.as_str()
        };
        debug!(key = %key, value = %value, "header");
    }
}

/// Serialize a write payload. Fails locally, never touching the network.
pub(crate) fn encode_body<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(ApiError::Serialization)
}

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
