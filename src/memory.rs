//! An in-process directory that answers queries the way the kernel does.
//!
//! Useful for exercising finders and transforms on hosts without the NT API.

use crate::attributes::FileAttributes;
use crate::record::{FullDirInformation, InformationClass, NamesInformation, encode_record};
use crate::scanner::{DirectorySource, QueryResult};
use crate::status::NtStatus;
use crate::time::utc_to_filetime_saturating;
use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobMatcher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zerocopy::{I64, U32};

/// One entry served by a [`MemoryDirectory`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntry {
    pub name: String,
    pub attributes: FileAttributes,
    pub length: u64,
    pub allocation_size: u64,
    pub creation_time: DateTime<Utc>,
    pub last_access_time: DateTime<Utc>,
    pub last_write_time: DateTime<Utc>,
    pub change_time: DateTime<Utc>,
}

impl MemoryEntry {
    pub fn file(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            attributes: FileAttributes::ARCHIVE,
            length,
            allocation_size: length.checked_next_multiple_of(4096).unwrap_or(u64::MAX),
            creation_time: DateTime::<Utc>::UNIX_EPOCH,
            last_access_time: DateTime::<Utc>::UNIX_EPOCH,
            last_write_time: DateTime::<Utc>::UNIX_EPOCH,
            change_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            attributes: FileAttributes::DIRECTORY,
            allocation_size: 0,
            ..Self::file(name, 0)
        }
    }

    pub fn with_attributes(mut self, attributes: FileAttributes) -> Self {
        self.attributes |= attributes;
        self
    }

    pub fn with_times(
        mut self,
        creation: DateTime<Utc>,
        last_access: DateTime<Utc>,
        last_write: DateTime<Utc>,
    ) -> Self {
        self.creation_time = creation;
        self.last_access_time = last_access;
        self.last_write_time = last_write;
        self.change_time = last_write;
        self
    }

    fn full_header(&self, index: usize, name_units: usize) -> FullDirInformation {
        FullDirInformation {
            next_entry_offset: U32::new(0),
            file_index: U32::new(index as u32),
            creation_time: I64::new(utc_to_filetime_saturating(self.creation_time)),
            last_access_time: I64::new(utc_to_filetime_saturating(self.last_access_time)),
            last_write_time: I64::new(utc_to_filetime_saturating(self.last_write_time)),
            change_time: I64::new(utc_to_filetime_saturating(self.change_time)),
            end_of_file: I64::new(i64::try_from(self.length).unwrap_or(i64::MAX)),
            allocation_size: I64::new(i64::try_from(self.allocation_size).unwrap_or(i64::MAX)),
            file_attributes: U32::new(self.attributes.bits()),
            file_name_length: U32::new((name_units * size_of::<u16>()) as u32),
            ea_size: U32::new(0),
        }
    }

    fn names_header(index: usize, name_units: usize) -> NamesInformation {
        NamesInformation {
            next_entry_offset: U32::new(0),
            file_index: U32::new(index as u32),
            file_name_length: U32::new((name_units * size_of::<u16>()) as u32),
        }
    }
}

/// A fixed list of entries served one query at a time.
///
/// Patterns use the kernel's `*` and `?` wildcards and match without regard to
/// case. An entry that does not fit the caller's buffer is reported with
/// `STATUS_BUFFER_OVERFLOW` and skipped.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    entries: Vec<MemoryEntry>,
    cursor: usize,
    matcher: Option<GlobMatcher>,
    matched_any: bool,
    closes: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub fn new(entries: impl IntoIterator<Item = MemoryEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Shared counter of how many times this directory has been closed.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    fn latch_pattern(&mut self, pattern: &[u16]) -> Result<(), NtStatus> {
        self.matcher = Some(compile_pattern(pattern)?);
        self.cursor = 0;
        self.matched_any = false;
        Ok(())
    }
}

impl DirectorySource for MemoryDirectory {
    fn query(
        &mut self,
        buffer: &mut [u8],
        class: InformationClass,
        pattern: &[u16],
        restart_scan: bool,
    ) -> QueryResult {
        if restart_scan || self.matcher.is_none() {
            if let Err(status) = self.latch_pattern(pattern) {
                return QueryResult::status(status);
            }
        }
        let Some(matcher) = self.matcher.as_ref() else {
            return QueryResult::status(NtStatus::INVALID_HANDLE);
        };

        while let Some(entry) = self.entries.get(self.cursor) {
            let index = self.cursor;
            self.cursor += 1;
            if !matcher.is_match(&entry.name) {
                continue;
            }
            self.matched_any = true;

            let name: Vec<u16> = entry.name.encode_utf16().collect();
            let written = match class {
                InformationClass::FullDirectory => {
                    encode_record(&entry.full_header(index, name.len()), &name, buffer)
                }
                InformationClass::Names => {
                    encode_record(&MemoryEntry::names_header(index, name.len()), &name, buffer)
                }
            };
            return match written {
                Some(information) => QueryResult::written(information),
                None => QueryResult::status(NtStatus::BUFFER_OVERFLOW),
            };
        }

        if self.matched_any {
            QueryResult::status(NtStatus::NO_MORE_FILES)
        } else {
            QueryResult::status(NtStatus::NO_SUCH_FILE)
        }
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Builds a case-insensitive matcher from a kernel wildcard pattern. An empty
/// pattern matches everything.
fn compile_pattern(pattern: &[u16]) -> Result<GlobMatcher, NtStatus> {
    let pattern = String::from_utf16(pattern).map_err(|_| NtStatus::OBJECT_NAME_INVALID)?;
    let mut glob = String::with_capacity(pattern.len() + 1);
    if pattern.is_empty() {
        glob.push('*');
    }
    for c in pattern.chars() {
        match c {
            '[' | ']' | '{' | '}' | '\\' => {
                glob.push('\\');
                glob.push(c);
            }
            _ => glob.push(c),
        }
    }
    GlobBuilder::new(&glob)
        .case_insensitive(true)
        .literal_separator(false)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|_| NtStatus::OBJECT_NAME_INVALID)
}
