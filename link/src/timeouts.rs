//! Timeout configuration for the HTTP transport.
//!
//! The engine itself never times out a request; these values are handed to the
//! `reqwest::Client` the client builder constructs, so a stalled page fetch is
//! bounded by the transport.

use std::time::Duration;

/// Timeout configuration for coordinator requests.
///
/// # Examples
///
/// ```rust
/// use presto_link::PrestoLinkTimeouts;
/// use std::time::Duration;
///
/// // Use defaults (recommended for most cases)
/// let timeouts = PrestoLinkTimeouts::default();
///
/// // Long-running analytical queries behind a slow network
/// let timeouts = PrestoLinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(30))
///     .request_timeout(Duration::from_secs(300))
///     .build();
///
/// // Aggressive timeouts for a local coordinator
/// let timeouts = PrestoLinkTimeouts::fast();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrestoLinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for a whole request, from send to the end of the response body.
    /// The coordinator long-polls page requests, so this must exceed its
    /// wait time. Zero disables the limit.
    /// Default: 60 seconds
    pub request_timeout: Duration,
}

impl Default for PrestoLinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl PrestoLinkTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> PrestoLinkTimeoutsBuilder {
        PrestoLinkTimeoutsBuilder::new()
    }

    /// Shorter timeouts suitable for a coordinator on localhost.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Longer timeouts for remote coordinators and heavy queries.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(600),
        }
    }

    /// Check if a duration represents "no timeout" (zero or very large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365) // > 1 year
    }
}

/// Builder for creating custom [`PrestoLinkTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct PrestoLinkTimeoutsBuilder {
    timeouts: PrestoLinkTimeouts,
}

impl PrestoLinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: PrestoLinkTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    /// Set the whole-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    /// Set the whole-request timeout in seconds.
    pub fn request_timeout_secs(self, secs: u64) -> Self {
        self.request_timeout(Duration::from_secs(secs))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> PrestoLinkTimeouts {
        self.timeouts
    }
}
