//! Frontend origin parsing.

use url::Url;

use crate::candidates::candidate::InvalidEndpoint;

/// The address the frontend itself is served from.
///
/// Unlike a [`Candidate`](crate::candidates::Candidate), an origin may be
/// taken from a full page URL; the path is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
    /// Explicit port, if any. `None` means the scheme default.
    pub port: Option<u16>,
}

impl Origin {
    /// Extract the origin from a URL string.
    pub fn parse(raw: &str) -> Result<Self, InvalidEndpoint> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidEndpoint::Empty);
        }

        let url = Url::parse(trimmed)?;
        let host = url.host_str().ok_or(InvalidEndpoint::MissingHost)?.to_string();

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
        })
    }

    /// True when the origin's explicit port is one of the recognized
    /// dev-proxy ports.
    pub fn is_dev_proxy(&self, dev_proxy_ports: &[u16]) -> bool {
        self.port.is_some_and(|p| dev_proxy_ports.contains(&p))
    }
}
