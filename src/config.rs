//! Client configuration
//!
//! The API location is an explicit value handed to the gateway rather than
//! a global read at load time, so tests and alternative front-ends can point
//! a client anywhere without touching the environment.

use garde::Validate;
use reqwest::Url;
use thiserror::Error;
use web_time::Duration;

use crate::constants::api::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

/// Environment variable selecting the API base URL
pub const API_URL_VAR: &str = "CARCIO_API_URL";
/// Environment variable overriding the host prefixed to relative image paths
pub const IMAGE_HOST_VAR: &str = "CARCIO_IMAGE_HOST";
/// Environment variable selecting the request timeout in seconds
pub const TIMEOUT_VAR: &str = "CARCIO_HTTP_TIMEOUT_SECS";

/// Errors produced while assembling a [`ClientConfig`]
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric variable held something else
    #[error("{var} must be a number, got {value:?}")]
    NotANumber {
        /// Name of the offending variable
        var: &'static str,
        /// The raw value found
        value: String,
    },
    /// The configured values failed validation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] garde::Report),
}

/// Where and how the client talks to the game API
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ClientConfig {
    /// Base URL of the versioned API, without trailing slash
    #[garde(url)]
    api_base_url: String,
    /// Scheme and authority prefixed to relative image paths
    #[garde(url)]
    image_host: String,
    /// Per-request timeout in seconds
    #[garde(range(min = MIN_TIMEOUT_SECS, max = MAX_TIMEOUT_SECS))]
    timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Creates a configuration for the given API base URL
    ///
    /// The image host defaults to the origin (scheme, host and port) of the
    /// base URL, which is where the API serves its static files.
    pub fn with_base_url(base_url: &str) -> Self {
        let api_base_url = normalize_base_url(base_url);
        let image_host = origin_of(&api_base_url).unwrap_or_else(|| api_base_url.clone());
        Self {
            api_base_url,
            image_host,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the image host
    #[must_use]
    pub fn image_host(mut self, host: &str) -> Self {
        self.image_host = normalize_base_url(host);
        self
    }

    /// Overrides the request timeout
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Checks the configuration and returns it if valid
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if a URL does not parse or the timeout is
    /// outside its bounds.
    pub fn validated(self) -> Result<Self, Error> {
        self.validate()?;
        Ok(self)
    }

    /// Reads the configuration from the process environment and `.env`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or the result fails
    /// validation.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or the result fails
    /// validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(API_URL_VAR) {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(&url),
            _ => Self::default(),
        };
        if let Some(host) = lookup(IMAGE_HOST_VAR).filter(|host| !host.trim().is_empty()) {
            config = config.image_host(&host);
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            let secs = value.trim().parse().map_err(|_| Error::NotANumber {
                var: TIMEOUT_VAR,
                value: value.clone(),
            })?;
            config = config.timeout_secs(secs);
        }
        config.validated()
    }

    /// Base URL of the API
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Host used to resolve relative image paths
    pub fn image_base(&self) -> &str {
        &self.image_host
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin
        .is_tuple()
        .then(|| origin.ascii_serialization())
}
