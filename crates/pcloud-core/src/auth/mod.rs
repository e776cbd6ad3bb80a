//! Authentication primitives.
//!
//! pCloud authenticates requests with an opaque token passed as the `auth`
//! query parameter. A token is obtained once from a username and password.

mod credentials;
mod token;

pub use credentials::LoginCredentials;
pub use token::AuthToken;
