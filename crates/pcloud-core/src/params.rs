//! Request query parameters.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Query key carrying the auth token.
pub const AUTH_KEY: &str = "auth";

/// Query key carrying a remote path.
pub const PATH_KEY: &str = "path";

/// Keys whose values are replaced by a placeholder in logs.
const SECRET_KEYS: &[&str] = &[AUTH_KEY, "password"];

const PLACEHOLDER: &str = "[REDACTED]";

/// Prefix a remote path with `/` unless it already starts with one.
///
/// ```
/// use pcloud_core::params::normalize_path;
///
/// assert_eq!(normalize_path("docs/report.pdf"), "/docs/report.pdf");
/// assert_eq!(normalize_path("/docs"), "/docs");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}

/// Query parameters for one API call.
///
/// Keys are unique; inserting an existing key replaces its value. Values are
/// stored in their wire (string) form.
///
/// # Example
///
/// ```
/// use pcloud_core::Params;
///
/// let params = Params::new().with("path", "docs").with("recursive", 1);
/// assert_eq!(params.get("recursive"), Some("1"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`; values from `other` win on collision.
    pub fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// Consuming variant of [`Params::extend`].
    pub fn merged(mut self, other: Params) -> Self {
        self.extend(other);
        self
    }

    /// Ensure the `path` parameter, if present, starts with `/`.
    pub fn normalize_path(&mut self) {
        if let Some(path) = self.0.get_mut(PATH_KEY)
            && !path.starts_with('/')
        {
            path.insert(0, '/');
        }
    }

    /// A view of the parameters that hides secrets when displayed.
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

// Debug goes through the redacted view so tokens never reach logs.
impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, redact(k, v))))
            .finish()
    }
}

/// Display adapter produced by [`Params::redacted`].
///
/// Renders `key=value` pairs joined by `&`, with the auth token and
/// password replaced by a placeholder.
pub struct Redacted<'a>(&'a Params);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, redact(key, value))?;
        }
        Ok(())
    }
}

fn redact<'a>(key: &str, value: &'a str) -> &'a str {
    if SECRET_KEYS.contains(&key) {
        PLACEHOLDER
    } else {
        value
    }
}
