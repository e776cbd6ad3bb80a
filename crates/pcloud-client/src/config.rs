//! Client configuration and builder.

use std::time::Duration;

use pcloud_core::{AuthToken, Endpoint, Result};

use crate::client::PCloudClient;

/// Timeout applied to every HTTP exchange unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by every connection a client opens.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API host to talk to.
    pub endpoint: Endpoint,
    /// Total time allowed for one request/response exchange.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("pcloud-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Builder for [`PCloudClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pcloud_client::PCloudClient;
///
/// # fn example() -> Result<(), pcloud_core::Error> {
/// let client = PCloudClient::builder()
///     .endpoint_name("eapi")?
///     .token("my-token")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// assert!(!client.is_connected());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    token: Option<AuthToken>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the API host.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    /// Select the API host by name (`api` or `eapi`).
    ///
    /// # Errors
    ///
    /// Fails immediately for any other name.
    pub fn endpoint_name(mut self, name: &str) -> Result<Self> {
        self.config.endpoint = Endpoint::from_name(name)?;
        Ok(self)
    }

    /// Set the auth token. An empty string leaves the client without one.
    pub fn token(mut self, token: impl Into<AuthToken>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client. No connection is opened yet.
    pub fn build(self) -> Result<PCloudClient> {
        PCloudClient::from_config(self.config, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, Endpoint::Api);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("pcloud-client/"));
    }

    #[test]
    fn unknown_endpoint_name_fails_fast() {
        let err = ClientBuilder::new().endpoint_name("moon").unwrap_err();
        assert!(matches!(err, pcloud_core::Error::Config(_)));
    }

    #[test]
    fn empty_token_means_no_token() {
        let builder = ClientBuilder::new().token("");
        assert!(builder.token.is_none());
        let builder = ClientBuilder::new().token("abc");
        assert!(builder.token.is_some());
    }
}
