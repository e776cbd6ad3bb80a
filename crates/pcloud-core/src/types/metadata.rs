//! File and folder metadata.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Metadata of a file or folder as returned by `listfolder` and `stat`.
///
/// Only the commonly used fields are typed; anything else stays available
/// through the raw [`Payload`](crate::Payload).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub isfolder: bool,
    #[serde(default)]
    pub fileid: Option<u64>,
    #[serde(default)]
    pub folderid: Option<u64>,
    #[serde(default)]
    pub parentfolderid: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub contenttype: Option<String>,
    #[serde(default)]
    pub hash: Option<u64>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub modified: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub contents: Vec<Metadata>,
}

impl Metadata {
    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Metadata> {
        self.contents.iter().find(|entry| entry.name == name)
    }

    /// Direct children that are files.
    pub fn files(&self) -> impl Iterator<Item = &Metadata> {
        self.contents.iter().filter(|entry| !entry.isfolder)
    }
}

/// Response from `listfolder`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FolderListing {
    pub metadata: Metadata,
}

// pCloud sends "Thu, 21 Mar 2013 18:31:45 +0000" by default and Unix
// seconds when the request carries `timeformat=timestamp`.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Rfc2822(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Rfc2822(raw)) => DateTime::parse_from_rfc2822(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(Raw::Seconds(secs)) => DateTime::from_timestamp(secs, 0)
            .map(|utc| Some(utc.fixed_offset()))
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {secs}"))),
    }
}
