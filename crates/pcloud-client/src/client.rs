//! The pCloud client: connection lifecycle and the shared request pipeline.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::RwLock as AsyncRwLock;
use tracing::{debug, info, instrument, trace};
use url::Url;

use pcloud_core::envelope::{self, Payload};
use pcloud_core::params::AUTH_KEY;
use pcloud_core::{AuthToken, BaseUrl, Error, Result, TransportError, validate};

use crate::config::{ClientBuilder, ClientConfig};
use crate::connection::{Connection, ConnectionGuard, ConnectionState, transport_error};
use crate::request::ApiRequest;

/// Async client for the pCloud HTTP API.
///
/// A client starts out disconnected. Call [`PCloudClient::connect`] (or
/// [`PCloudClient::connect_scoped`]) before issuing requests and
/// [`PCloudClient::disconnect`] when done; every API call made while
/// disconnected fails with [`Error::NotConnected`].
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and every clone
/// shares the same token and connection. No lock is held across an
/// `.await`, so concurrent calls never wait on each other here.
///
/// # Example
///
/// ```no_run
/// use pcloud_client::PCloudClient;
/// use pcloud_core::Params;
///
/// # async fn example() -> Result<(), pcloud_core::Error> {
/// let client = PCloudClient::new("my-token", "api")?;
/// client.connect()?;
///
/// let listing = client.listfolder(Params::new().with("path", "/")).await?;
/// println!("{:?}", listing.get("metadata"));
///
/// client.disconnect();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PCloudClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    base: BaseUrl,
    token: AsyncRwLock<Option<AuthToken>>,
    connection: RwLock<Option<Connection>>,
}

impl PCloudClient {
    /// Create a client for a named endpoint (`api` or `eapi`).
    ///
    /// An empty token leaves the client unauthenticated; only token
    /// acquisition and digest calls work until one is set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown endpoint name.
    pub fn new(token: impl Into<AuthToken>, endpoint: &str) -> Result<Self> {
        ClientBuilder::new()
            .endpoint_name(endpoint)?
            .token(token)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_config(config: ClientConfig, token: Option<AuthToken>) -> Result<Self> {
        let base = config.endpoint.base_url()?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                base,
                token: AsyncRwLock::new(token),
                connection: RwLock::new(None),
            }),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.base
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // ========================================================================
    // Connection lifecycle
    // ========================================================================

    /// Open the HTTP session. Must be called before any request.
    ///
    /// Connecting while already connected replaces the session; requests
    /// still in flight finish on the old one.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub fn connect(&self) -> Result<()> {
        let connection = Connection::open(self.inner.base.clone(), &self.inner.config)?;
        let previous = self
            .inner
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(connection);

        if previous.is_some() {
            debug!("Replaced existing session");
        }
        info!("Connected to pCloud API");
        Ok(())
    }

    /// Close the HTTP session. Does nothing when not connected.
    pub fn disconnect(&self) {
        let previous = self
            .inner
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if previous.is_some() {
            info!(base = %self.inner.base, "Disconnected from pCloud API");
        }
    }

    /// Connect and return a guard that disconnects when dropped.
    pub fn connect_scoped(&self) -> Result<ConnectionGuard> {
        self.connect()?;
        Ok(ConnectionGuard::new(self.clone()))
    }

    /// Run `f` on a connected client, disconnecting afterwards.
    ///
    /// The session is released whether `f` succeeds, fails or panics.
    pub async fn scoped<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnOnce(PCloudClient) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let guard = self.connect_scoped()?;
        let result = f(guard.client().clone()).await;
        drop(guard);
        result
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.inner
            .connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn connection(&self) -> Result<Connection> {
        self.inner
            .connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotConnected)
    }

    // ========================================================================
    // Credentials
    // ========================================================================

    /// Replace the auth token. Takes effect on the next request.
    pub async fn set_token(&self, token: impl Into<AuthToken>) {
        let token = token.into();
        *self.inner.token.write().await = (!token.is_empty()).then_some(token);
    }

    /// Forget the auth token.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    /// Export the current token, e.g. for persistence.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn token(&self) -> Option<AuthToken> {
        self.inner.token.read().await.clone()
    }

    pub(crate) async fn require_token(&self) -> Result<AuthToken> {
        self.inner
            .token
            .read()
            .await
            .clone()
            .ok_or(Error::MissingCredentials)
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Execute one API call.
    ///
    /// Checks run in this order, all before any network activity: token
    /// present (authenticated routes), connection open, required parameters
    /// supplied. The response must be a JSON envelope; see
    /// [`envelope::interpret`] for how the result code is handled.
    #[instrument(skip(self, request), fields(route = %request.route, method = %request.method))]
    pub async fn call(&self, request: ApiRequest) -> Result<Payload> {
        let token = if request.auth {
            Some(self.require_token().await?)
        } else {
            None
        };
        let connection = self.connection()?;
        validate::check_route(&request.route, &[&request.params, &request.extra])?;

        let ApiRequest {
            route,
            method,
            params,
            extra,
            upload,
            tolerate_not_found,
            ..
        } = request;

        let mut query = params.merged(extra);
        if let Some(token) = &token {
            query.insert(AUTH_KEY, token.as_str());
        }
        query.normalize_path();

        debug!(params = %query.redacted(), "pCloud request");

        let mut builder = connection
            .http
            .request(method.clone(), connection.base.route_url(&route))
            .query(&query);
        if let Some(upload) = upload {
            trace!(files = upload.len(), "Attaching multipart body");
            builder = builder.multipart(upload.into_form());
        }

        let response = builder.send().await.map_err(transport_error)?;
        trace!(status = %response.status(), "pCloud response");

        let body = response.bytes().await.map_err(transport_error)?;
        let payload = Payload::from_slice(&route, &body)?;

        envelope::interpret(&route, method.as_str(), payload, tolerate_not_found)
    }

    /// Fetch raw bytes from a pre-authorized download link.
    ///
    /// No envelope is parsed and no `auth` parameter is added; the link
    /// itself carries the authorization.
    #[instrument(skip(self, url), fields(host = ?url.host_str()))]
    pub async fn fetch_raw(&self, url: &Url) -> Result<Vec<u8>> {
        let connection = self.connection()?;
        debug!("Fetching raw bytes");

        let response = connection
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        trace!(len = bytes.len(), "Fetched raw bytes");
        Ok(bytes.to_vec())
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for PCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PCloudClient")
            .field("base", &self.inner.base)
            .field("state", &self.state())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
