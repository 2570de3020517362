//! Image path resolution
//!
//! The API hands out image references either as absolute URLs or as paths
//! relative to its own host (`/api/v1/static/...`). Rendering needs the
//! absolute form.

use crate::config::ClientConfig;

/// Resolves image references against a configured host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    host: String,
}

impl ImageResolver {
    /// Creates a resolver prefixing relative paths with `host`
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_owned(),
        }
    }

    /// Absolute URL for `path`
    ///
    /// Absolute URLs pass through unchanged, relative paths are prefixed
    /// with the host, blank paths resolve to nothing.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            None
        } else if path.starts_with("http://") || path.starts_with("https://") {
            Some(path.to_owned())
        } else if path.starts_with('/') {
            Some(format!("{}{path}", self.host))
        } else {
            Some(format!("{}/{path}", self.host))
        }
    }

    /// Resolves an optional reference
    pub fn resolve_opt(&self, path: Option<&str>) -> Option<String> {
        path.and_then(|path| self.resolve(path))
    }
}

impl From<&ClientConfig> for ImageResolver {
    fn from(config: &ClientConfig) -> Self {
        Self::new(config.image_base())
    }
}
