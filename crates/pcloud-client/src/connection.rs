//! HTTP connection lifecycle.

use std::ops::Deref;

use tracing::debug;
use url::Url;

use pcloud_core::{BaseUrl, ConfigError, Result, TransportError};

use crate::client::PCloudClient;
use crate::config::ClientConfig;

/// Lifecycle state of a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// A live HTTP session bound to one base URL.
///
/// Cloning is cheap: the reqwest client shares its pool internally, so an
/// in-flight request keeps working even if the owning client reconnects.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    pub(crate) http: reqwest::Client,
    pub(crate) base: BaseUrl,
}

impl Connection {
    pub(crate) fn open(base: BaseUrl, config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        debug!(base = %base, timeout_ms = config.timeout.as_millis() as u64, "Opened HTTP session");
        Ok(Self { http, base })
    }
}

/// Scoped connection returned by [`PCloudClient::connect_scoped`].
///
/// Dereferences to the client. Dropping the guard disconnects, whichever
/// way the scope is left.
///
/// # Example
///
/// ```no_run
/// use pcloud_client::PCloudClient;
/// use pcloud_core::Params;
///
/// # async fn example() -> Result<(), pcloud_core::Error> {
/// let client = PCloudClient::new("my-token", "api")?;
/// {
///     let pcloud = client.connect_scoped()?;
///     let root = pcloud.listfolder(Params::new().with("folderid", 0)).await?;
///     println!("{:?}", root.get("metadata"));
/// }
/// assert!(!client.is_connected());
/// # Ok(())
/// # }
/// ```
#[must_use = "the connection is closed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ConnectionGuard {
    client: PCloudClient,
}

impl ConnectionGuard {
    pub(crate) fn new(client: PCloudClient) -> Self {
        Self { client }
    }

    /// Returns the connected client.
    pub fn client(&self) -> &PCloudClient {
        &self.client
    }
}

impl Deref for ConnectionGuard {
    type Target = PCloudClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.client.disconnect();
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
///
/// The request URL is reported without its query string, which carries
/// `auth` and `password`.
pub(crate) fn transport_error(err: reqwest::Error) -> TransportError {
    let url = err.url().map(url_without_query);
    let err = err.without_url();
    let message = match &url {
        Some(url) => format!("{err} ({url})"),
        None => err.to_string(),
    };

    if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if let Some(status) = err.status() {
        TransportError::Status {
            status: status.as_u16(),
            url: url.unwrap_or_default(),
        }
    } else {
        TransportError::Http { message }
    }
}

fn url_without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}
