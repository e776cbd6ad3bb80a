//! pcloud-client - Async client for the pCloud HTTP API.
//!
//! Every operation is a single HTTP request built by one shared pipeline:
//! the auth token is injected as the `auth` query parameter, `path` values
//! are normalized to start with `/`, and the JSON result envelope is turned
//! into either a [`Payload`] or a typed [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use pcloud_client::PCloudClient;
//! use pcloud_core::{LoginCredentials, Params};
//!
//! # async fn example() -> Result<(), pcloud_core::Error> {
//! let client = PCloudClient::new("", "eapi")?;
//!
//! client
//!     .scoped(|pcloud| async move {
//!         pcloud
//!             .login(&LoginCredentials::new("alice@example.com", "hunter2"))
//!             .await?;
//!         let bytes = pcloud
//!             .download_file(Params::new().with("path", "docs/report.pdf"))
//!             .await?;
//!         println!("downloaded {} bytes", bytes.len());
//!         Ok::<_, pcloud_core::Error>(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
pub mod config;
pub mod connection;
pub mod logging;
pub mod request;

pub use client::PCloudClient;
pub use config::{ClientBuilder, ClientConfig};
pub use connection::{ConnectionGuard, ConnectionState};
pub use request::{ApiRequest, Upload, UploadFile};

pub use pcloud_core::{
    ApiError, AuthToken, Endpoint, Error, FileLink, LoginCredentials, Metadata, Params, Payload,
    Result,
};
