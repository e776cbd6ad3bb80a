//! Request description passed through the shared pipeline.

use std::fmt;

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use pcloud_core::Params;

/// Multipart field name used for uploaded files.
pub const UPLOAD_FIELD: &str = "file";

/// One API call: route, method, parameters and options.
///
/// Requests are authenticated by default.
///
/// # Example
///
/// ```
/// use pcloud_client::ApiRequest;
/// use pcloud_core::Params;
///
/// let request = ApiRequest::get("stat")
///     .params(Params::new().with("path", "/maybe.txt"))
///     .tolerate_not_found();
/// assert!(request.requires_auth());
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) route: String,
    pub(crate) method: Method,
    pub(crate) auth: bool,
    pub(crate) params: Params,
    pub(crate) extra: Params,
    pub(crate) upload: Option<Upload>,
    pub(crate) tolerate_not_found: bool,
}

impl ApiRequest {
    pub fn new(route: impl Into<String>, method: Method) -> Self {
        Self {
            route: route.into(),
            method,
            auth: true,
            params: Params::new(),
            extra: Params::new(),
            upload: None,
            tolerate_not_found: false,
        }
    }

    pub fn get(route: impl Into<String>) -> Self {
        Self::new(route, Method::GET)
    }

    pub fn post(route: impl Into<String>) -> Self {
        Self::new(route, Method::POST)
    }

    /// Send without the `auth` parameter.
    pub fn unauthenticated(mut self) -> Self {
        self.auth = false;
        self
    }

    /// Replace the query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add a single query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Parameters merged over [`ApiRequest::params`]; these win on collision.
    pub fn extra(mut self, extra: Params) -> Self {
        self.extra = extra;
        self
    }

    /// Attach a multipart body.
    pub fn upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Turn a "not found" API error into an empty successful payload.
    pub fn tolerate_not_found(mut self) -> Self {
        self.tolerate_not_found = true;
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn requires_auth(&self) -> bool {
        self.auth
    }
}

/// Files sent as a multipart body to `uploadfile`.
#[derive(Clone, Debug, Default)]
pub struct Upload {
    files: Vec<UploadFile>,
}

/// A single file of an [`Upload`].
#[derive(Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("filename", &self.filename)
            .field("bytes", &self.content.len())
            .finish()
    }
}

impl Upload {
    pub fn new() -> Self {
        Self::default()
    }

    /// An upload of exactly one file.
    pub fn single(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new().file(filename, content)
    }

    /// Add a file.
    pub fn file(mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.push(UploadFile {
            filename: filename.into(),
            content: content.into(),
        });
        self
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn into_form(self) -> Form {
        self.files.into_iter().fold(Form::new(), |form, file| {
            form.part(
                UPLOAD_FIELD,
                Part::bytes(file.content).file_name(file.filename),
            )
        })
    }
}
