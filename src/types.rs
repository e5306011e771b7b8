use crate::attributes::FileAttributes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An enumeration result copied out of the scan buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundEntry {
    /// The full path, starting from the root as the caller specified it.
    pub path: PathBuf,
    /// The file name as reported by the file system.
    pub name: String,
    pub attributes: FileAttributes,
    pub is_directory: bool,
    pub is_hidden: bool,
    /// The file length in bytes.
    pub length: u64,
    /// Timestamps are omitted when the file system reports an invalid one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_write_time: Option<DateTime<Utc>>,
}

/// Every match for one pattern in one directory.
#[derive(Debug, Serialize, Deserialize)]
pub struct FindResult {
    /// The directory that was enumerated.
    pub directory: PathBuf,
    /// The pattern handed to the file system.
    pub pattern: String,
    /// Matches in the order the file system returned them.
    pub entries: Vec<FoundEntry>,
}
