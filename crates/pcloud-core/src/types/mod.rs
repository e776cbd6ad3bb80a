//! Typed views of API response payloads.

mod file_link;
mod metadata;

pub use file_link::FileLink;
pub use metadata::{FolderListing, Metadata};
