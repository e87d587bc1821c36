//! Candidate base URLs.

use thiserror::Error;
use url::Url;

/// Reasons an endpoint string is rejected before probing.
#[derive(Debug, Error)]
pub enum InvalidEndpoint {
    #[error("endpoint must not be empty")]
    Empty,

    #[error("invalid URL: {0}")]
    Syntax(#[from] url::ParseError),

    #[error("unsupported scheme {0:?}, expected http or https")]
    Scheme(String),

    #[error("endpoint must include a host")]
    MissingHost,

    #[error("endpoint must be a bare base URL, got extra {0:?}")]
    NotBase(String),
}

/// A base URL considered during one discovery cycle.
///
/// Normalized to `scheme://host[:port]` with no trailing slash; default
/// ports are elided.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    base_url: String,
}

impl Candidate {
    /// Parse and normalize a base URL, rejecting anything that is not a
    /// bare http(s) origin.
    pub fn parse(raw: &str) -> Result<Self, InvalidEndpoint> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidEndpoint::Empty);
        }

        let url = Url::parse(trimmed)?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidEndpoint::Scheme(other.to_string())),
        }
        if url.host_str().is_none() {
            return Err(InvalidEndpoint::MissingHost);
        }
        if !matches!(url.path(), "" | "/") {
            return Err(InvalidEndpoint::NotBase(url.path().to_string()));
        }
        if let Some(query) = url.query() {
            return Err(InvalidEndpoint::NotBase(format!("?{}", query)));
        }
        if let Some(fragment) = url.fragment() {
            return Err(InvalidEndpoint::NotBase(format!("#{}", fragment)));
        }

        Ok(Self {
            base_url: url.origin().ascii_serialization(),
        })
    }

    /// The normalized base URL string.
    pub fn as_str(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_trailing_slash() {
        let c = Candidate::parse("http://192.168.1.5:8000/").unwrap();
        assert_eq!(c.as_str(), "http://192.168.1.5:8000");
    }

    #[test]
    fn test_elides_default_port() {
        let c = Candidate::parse("https://api.example.org:443").unwrap();
        assert_eq!(c.as_str(), "https://api.example.org");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Candidate::parse("not a url").is_err());
        assert!(Candidate::parse("").is_err());
        assert!(Candidate::parse("   ").is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            Candidate::parse("ftp://example.org"),
            Err(InvalidEndpoint::Scheme(_))
        ));
    }

    #[test]
    fn test_rejects_paths_and_queries() {
        assert!(matches!(
            Candidate::parse("http://example.org/api"),
            Err(InvalidEndpoint::NotBase(_))
        ));
        assert!(matches!(
            Candidate::parse("http://example.org/?x=1"),
            Err(InvalidEndpoint::NotBase(_))
        ));
    }
}
