use crate::attributes::FileAttributes;
use crate::path;
use crate::record::{FileName, FullDirInformation, FullDirRecord};
use crate::time::filetime_to_utc;
use crate::types::FoundEntry;
use chrono::{DateTime, Utc};

/// A lower-level view of one enumeration result.
///
/// Borrows the finder's scan buffer, so it is only valid until the next
/// query. Use [`to_found_entry`](Self::to_found_entry) to keep the data.
#[derive(Debug, Clone, Copy)]
pub struct FileSystemEntry<'a> {
    info: &'a FullDirInformation,
    name: FileName<'a>,
    directory: &'a str,
    root_directory: &'a str,
    original_root_directory: &'a str,
}

impl<'a> FileSystemEntry<'a> {
    pub(crate) fn new(
        record: FullDirRecord<'a>,
        directory: &'a str,
        root_directory: &'a str,
        original_root_directory: &'a str,
    ) -> Self {
        Self {
            info: record.header,
            name: record.name,
            directory,
            root_directory,
            original_root_directory,
        }
    }

    /// Full path of the directory this entry resides in.
    pub fn directory(&self) -> &'a str {
        self.directory
    }

    /// Full path of the root directory used for the enumeration.
    pub fn root_directory(&self) -> &'a str {
        self.root_directory
    }

    /// The root directory as the caller specified it.
    pub fn original_root_directory(&self) -> &'a str {
        self.original_root_directory
    }

    pub fn file_name(&self) -> FileName<'a> {
        self.name
    }

    pub fn attributes(&self) -> FileAttributes {
        FileAttributes::from_bits_retain(self.info.file_attributes.get())
    }

    /// Length of the file in bytes.
    pub fn length(&self) -> u64 {
        u64::try_from(self.info.end_of_file.get()).unwrap_or(0)
    }

    pub fn allocation_size(&self) -> u64 {
        u64::try_from(self.info.allocation_size.get()).unwrap_or(0)
    }

    pub fn file_index(&self) -> u32 {
        self.info.file_index.get()
    }

    pub fn ea_size(&self) -> u32 {
        self.info.ea_size.get()
    }

    pub fn creation_time_utc(&self) -> Option<DateTime<Utc>> {
        filetime_to_utc(self.info.creation_time.get())
    }

    pub fn last_access_time_utc(&self) -> Option<DateTime<Utc>> {
        filetime_to_utc(self.info.last_access_time.get())
    }

    pub fn last_write_time_utc(&self) -> Option<DateTime<Utc>> {
        filetime_to_utc(self.info.last_write_time.get())
    }

    pub fn change_time_utc(&self) -> Option<DateTime<Utc>> {
        filetime_to_utc(self.info.change_time.get())
    }

    pub fn is_directory(&self) -> bool {
        self.attributes().contains(FileAttributes::DIRECTORY)
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes().contains(FileAttributes::HIDDEN)
    }

    /// Full path of the entry.
    pub fn to_full_path(&self) -> String {
        path::full_path(self.directory, &self.name.to_string_lossy())
    }

    /// Full path of the entry, starting from the root as originally specified.
    pub fn to_specified_full_path(&self) -> String {
        path::specified_full_path(
            self.original_root_directory,
            self.root_directory,
            self.directory,
            &self.name.to_string_lossy(),
        )
    }

    /// Copies the entry out of the scan buffer.
    pub fn to_found_entry(&self) -> FoundEntry {
        FoundEntry {
            path: self.to_specified_full_path().into(),
            name: self.name.to_string_lossy(),
            attributes: self.attributes(),
            is_directory: self.is_directory(),
            is_hidden: self.is_hidden(),
            length: self.length(),
            creation_time: self.creation_time_utc(),
            last_access_time: self.last_access_time_utc(),
            last_write_time: self.last_write_time_utc(),
        }
    }
}
