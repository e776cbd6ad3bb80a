//! API endpoint selection and base URL validation.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{ConfigError, Error};

/// Base URL of the standard pCloud API host.
pub const API_URL: &str = "https://api.pcloud.com/";

/// Base URL of the alternate (EU) pCloud API host.
pub const EAPI_URL: &str = "https://eapi.pcloud.com/";

/// The API host a client talks to.
///
/// Only two hosts exist, selected by name (`api` or `eapi`). A custom base
/// URL can be given explicitly, which is how tests point the client at a
/// local mock server.
///
/// # Example
///
/// ```
/// use pcloud_core::Endpoint;
///
/// let endpoint: Endpoint = "eapi".parse().unwrap();
/// assert_eq!(endpoint, Endpoint::Eapi);
/// assert!("nowhere".parse::<Endpoint>().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
    #[default]
    Api,
    Eapi,
    Custom(BaseUrl),
}

impl Endpoint {
    /// Names accepted by [`Endpoint::from_name`].
    pub const NAMES: [&'static str; 2] = ["api", "eapi"];

    /// Select one of the fixed endpoints by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEndpoint`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "api" => Ok(Endpoint::Api),
            "eapi" => Ok(Endpoint::Eapi),
            other => Err(ConfigError::UnknownEndpoint {
                name: other.to_string(),
                known: Self::NAMES.to_vec(),
            }
            .into()),
        }
    }

    /// Use an explicit base URL instead of one of the fixed hosts.
    pub fn custom(url: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Endpoint::Custom(BaseUrl::new(url)?))
    }

    /// Resolve the base URL for this endpoint.
    pub fn base_url(&self) -> Result<BaseUrl, Error> {
        match self {
            Endpoint::Api => BaseUrl::new(API_URL),
            Endpoint::Eapi => BaseUrl::new(EAPI_URL),
            Endpoint::Custom(base) => Ok(base.clone()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Api => f.write_str("api"),
            Endpoint::Eapi => f.write_str("eapi"),
            Endpoint::Custom(base) => write!(f, "{}", base),
        }
    }
}

/// A validated API base URL.
///
/// The URL is absolute, uses HTTPS (or HTTP for localhost) and always ends
/// with a single `/` so that routes can be appended directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| ConfigError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the full URL for an API route (e.g. `listfolder`).
    pub fn route_url(&self, route: &str) -> String {
        format!("{}{}", self.0.as_str(), route.trim_start_matches('/'))
    }

    /// Returns the URL scheme (`https` for the fixed hosts).
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(ConfigError::BaseUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(ConfigError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
