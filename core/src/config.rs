//! Connection settings an embedding application can load from its own config.
//!
//! The library never reads files or environment variables itself; this struct
//! only gives callers a serde-friendly way to carry the settings around.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;

fn default_verbose() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Explicit base URL. Takes precedence over `environment`.
    pub server_url: Option<String>,
    pub app_token: String,
    pub user_token: String,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Global per-request timeout. None blocks until the server answers.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server_url: None,
            app_token: String::new(),
            user_token: String::new(),
            verbose: default_verbose(),
            timeout_secs: None,
        }
    }
}
