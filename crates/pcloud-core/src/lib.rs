//! pcloud-core - Core types for the pCloud API client.
//!
//! This crate holds everything that does not touch the network: the error
//! taxonomy, endpoint selection, auth tokens, request parameters, the
//! required-parameter table and response envelope interpretation.

pub mod auth;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod params;
pub mod routes;
pub mod types;
pub mod validate;

pub use auth::{AuthToken, LoginCredentials};
pub use endpoint::{BaseUrl, Endpoint};
pub use envelope::Payload;
pub use error::{ApiError, ConfigError, Error, TransportError};
pub use params::Params;
pub use types::{FileLink, FolderListing, Metadata};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
