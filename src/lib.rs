//! # ntfind
//!
//! `ntfind` enumerates a directory through the NT native `NtQueryDirectoryFile`
//! call instead of `FindFirstFile`/`FindNextFile`. Each query asks for a single
//! entry matching a pattern and writes it into one reused scan buffer; the match
//! is exposed as a [`FileSystemEntry`] borrowing that buffer, so nothing is
//! allocated per entry unless the caller asks for an owned copy.
//!
//! A [`FileFinder`] owns the directory handle and the scan buffer and releases
//! both exactly once, either through [`FileFinder::close`] or on drop.
//!
//! Native enumeration is Windows-only. [`MemoryDirectory`] answers queries the
//! same way on any host.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use ntfind::{FileFinder, FileSystemEntry, FinderBuilder};
//!
//! let options = FinderBuilder::new(r"C:\Windows\").buffer_length(4096).build();
//! let mut finder = FileFinder::open(&options, |entry: &FileSystemEntry<'_>| {
//!     (!entry.is_directory()).then(|| (entry.to_specified_full_path(), entry.length()))
//! })
//! .expect("Failed to open directory");
//!
//! for result in finder.matches("*.exe") {
//!     let (path, length) = result.expect("Query failed");
//!     println!("{path} ({length} bytes)");
//! }
//! finder.close().expect("Failed to close directory");
//! ```

mod attributes;
mod buffer;
mod entry;
mod error;
mod finder;
mod memory;
mod native;
mod options;
pub mod output;
pub mod path;
mod record;
mod scanner;
mod status;
pub mod time;
mod types;

pub use attributes::FileAttributes;
pub use buffer::{DEFAULT_BUFFER_LENGTH, ScanBuffer};
pub use entry::FileSystemEntry;
pub use error::FinderError;
pub use finder::{FileFinder, IntoFoundEntry, Matches, TransformEntry, find, find_with_source};
pub use memory::{MemoryDirectory, MemoryEntry};
pub use native::NativeDirectory;
pub use options::{FinderBuilder, FinderOptions};
pub use record::{
    DirectoryRecord, FileName, FullDirInformation, FullDirRecord, InformationClass,
    NamesInformation, NamesRecord,
};
pub use scanner::{DirectoryScanner, DirectorySource, QueryResult};
pub use status::{NtStatus, StatusClass};
pub use types::{FindResult, FoundEntry};
