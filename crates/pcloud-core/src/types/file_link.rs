//! Download link returned by `getfilelink`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::routes;

/// A pre-authorized download link.
///
/// The API returns a list of hosts serving the file and a path that is
/// valid on each of them. Downloading needs no `auth` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub hosts: Vec<String>,
    pub path: String,
    #[serde(default)]
    pub expires: Option<String>,
}

impl FileLink {
    /// Absolute URL on the first (preferred) host.
    ///
    /// The URL is always `<scheme>://<host><path>`; pass the scheme of the
    /// API base URL (`https` for the public hosts).
    pub fn url(&self, scheme: &str) -> Result<Url, Error> {
        let host = self
            .hosts
            .first()
            .ok_or_else(|| Error::malformed(routes::GET_FILE_LINK, "empty 'hosts' list"))?;
        self.url_on(scheme, host)
    }

    /// Absolute URLs on every host, in the order returned by the API.
    pub fn urls(&self, scheme: &str) -> Result<Vec<Url>, Error> {
        self.hosts
            .iter()
            .map(|host| self.url_on(scheme, host))
            .collect()
    }

    fn url_on(&self, scheme: &str, host: &str) -> Result<Url, Error> {
        let raw = format!("{}://{}{}", scheme, host, self.path);
        Url::parse(&raw).map_err(|e| {
            Error::malformed(
                routes::GET_FILE_LINK,
                format!("invalid link '{}': {}", raw, e),
            )
        })
    }
}
