//! Syntactic and reachability validation of submitted URLs.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::{Host, Url};

use crate::domain::resolver::HostResolver;
use crate::error::AppError;

/// A URL that passed validation.
///
/// Keeps the submitted string untouched: that exact string is what gets
/// persisted and later redirected to.
#[derive(Debug, Clone)]
pub struct ValidatedUrl {
    original: String,
    parsed: Url,
}

impl ValidatedUrl {
    /// The URL exactly as submitted.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn parsed(&self) -> &Url {
        &self.parsed
    }

    pub fn into_original(self) -> String {
        self.original
    }
}

/// Validates URLs before a short code is allocated for them.
///
/// # Rules
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https`
/// 3. Must have a host
/// 4. Domain hosts must resolve (IP literals are accepted as-is)
///
/// The lookup is a single attempt bounded by the configured timeout. Every
/// failure, including a timeout, is reported as [`AppError::InvalidUrl`].
pub struct UrlValidator {
    resolver: Arc<dyn HostResolver>,
    lookup_timeout: Duration,
}

impl UrlValidator {
    pub fn new(resolver: Arc<dyn HostResolver>, lookup_timeout: Duration) -> Self {
        Self {
            resolver,
            lookup_timeout,
        }
    }

    /// Validates `raw` and checks that its host resolves.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] for malformed URLs, unsupported
    /// schemes, missing hosts, and hosts that fail to resolve in time.
    pub async fn validate(&self, raw: &str) -> Result<ValidatedUrl, AppError> {
        let parsed = parse_web_url(raw)?;

        match parsed.host() {
            Some(Host::Domain(domain)) => self.check_reachable(domain).await?,
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
            None => return Err(AppError::invalid_url("URL has no host")),
        }

        Ok(ValidatedUrl {
            original: raw.to_string(),
            parsed,
        })
    }

    async fn check_reachable(&self, domain: &str) -> Result<(), AppError> {
        match tokio::time::timeout(self.lookup_timeout, self.resolver.resolve(domain)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                debug!("Host {} did not resolve: {}", domain, e);
                Err(AppError::invalid_url(format!("host {domain}: {e}")))
            }
            Err(_) => {
                debug!("Host lookup for {} timed out", domain);
                Err(AppError::invalid_url(format!(
                    "host {domain}: lookup timed out after {}ms",
                    self.lookup_timeout.as_millis()
                )))
            }
        }
    }
}

/// Parses `raw` as an absolute `http`/`https` URL.
pub fn parse_web_url(raw: &str) -> Result<Url, AppError> {
    let parsed = Url::parse(raw).map_err(|e| AppError::invalid_url(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AppError::invalid_url(format!("unsupported scheme {other}"))),
    }
}
