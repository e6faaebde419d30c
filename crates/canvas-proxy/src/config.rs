//! Environment-driven proxy configuration.

use canvas_core::CanvasError;

/// Listen address used when `CANVAS_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Listen address (`CANVAS_ADDR`)
    pub addr: String,
    /// Base URL of the generative backend (`CANVAS_UPSTREAM_URL`)
    pub upstream_url: String,
}

impl ProxyConfig {
    pub fn new(addr: impl Into<String>, upstream_url: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            upstream_url: upstream_url.into(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// The listen address defaults; the upstream URL has no sane default
    /// and is required.
    pub fn from_env() -> Result<Self, CanvasError> {
        let addr = std::env::var("CANVAS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let upstream_url = std::env::var("CANVAS_UPSTREAM_URL")
            .map_err(|_| CanvasError::validation("CANVAS_UPSTREAM_URL is required"))?;
        Ok(Self { addr, upstream_url })
    }
}
