//! Fixed-layout records written by the directory query.
//!
//! The kernel writes records in little-endian byte order with the file name
//! trailing the fixed header. Headers are read in place; names are borrowed
//! straight out of the scan buffer.

use crate::error::FinderError;
use std::char::REPLACEMENT_CHARACTER;
use std::fmt::{self, Write};
use zerocopy::FromBytes;
use zerocopy::Immutable;
use zerocopy::IntoBytes;
use zerocopy::KnownLayout;
use zerocopy::Unaligned;

#[allow(non_camel_case_types)]
mod packed_nums {
    pub type u16_le = zerocopy::U16<zerocopy::LittleEndian>;
    pub type u32_le = zerocopy::U32<zerocopy::LittleEndian>;
    pub type i64_le = zerocopy::I64<zerocopy::LittleEndian>;
}
use packed_nums::*;

/// `FILE_INFORMATION_CLASS` values this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InformationClass {
    FullDirectory = 2,
    Names = 12,
}

/// `FILE_FULL_DIR_INFORMATION` without its trailing name.
#[repr(C)]
#[derive(Debug, Clone, Copy, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct FullDirInformation {
    pub next_entry_offset: u32_le,
    pub file_index: u32_le,
    pub creation_time: i64_le,
    pub last_access_time: i64_le,
    pub last_write_time: i64_le,
    pub change_time: i64_le,
    pub end_of_file: i64_le,
    pub allocation_size: i64_le,
    pub file_attributes: u32_le,
    pub file_name_length: u32_le,
    pub ea_size: u32_le,
}

/// `FILE_NAMES_INFORMATION` without its trailing name.
#[repr(C)]
#[derive(Debug, Clone, Copy, IntoBytes, Immutable, KnownLayout, FromBytes, Unaligned)]
pub struct NamesInformation {
    pub next_entry_offset: u32_le,
    pub file_index: u32_le,
    pub file_name_length: u32_le,
}

/// A record type the scanner can ask the kernel for.
pub trait DirectoryRecord<'a>: Sized {
    const CLASS: InformationClass;
    /// Size of the fixed part of the record.
    const HEADER_SIZE: usize;

    /// Reads a record from the bytes the query reported as written.
    fn parse(bytes: &'a [u8]) -> Result<Self, FinderError>;
}

/// A full directory record borrowed from the scan buffer.
#[derive(Debug, Clone, Copy)]
pub struct FullDirRecord<'a> {
    pub header: &'a FullDirInformation,
    pub name: FileName<'a>,
}

impl<'a> DirectoryRecord<'a> for FullDirRecord<'a> {
    const CLASS: InformationClass = InformationClass::FullDirectory;
    const HEADER_SIZE: usize = size_of::<FullDirInformation>();

    fn parse(bytes: &'a [u8]) -> Result<Self, FinderError> {
        let (header, rest) = FullDirInformation::ref_from_prefix(bytes)
            .map_err(|_| FinderError::MalformedRecord("record shorter than its header"))?;
        let name = FileName::parse(rest, header.file_name_length.get())?;
        Ok(Self { header, name })
    }
}

/// A names-only record borrowed from the scan buffer.
#[derive(Debug, Clone, Copy)]
pub struct NamesRecord<'a> {
    pub header: &'a NamesInformation,
    pub name: FileName<'a>,
}

impl<'a> DirectoryRecord<'a> for NamesRecord<'a> {
    const CLASS: InformationClass = InformationClass::Names;
    const HEADER_SIZE: usize = size_of::<NamesInformation>();

    fn parse(bytes: &'a [u8]) -> Result<Self, FinderError> {
        let (header, rest) = NamesInformation::ref_from_prefix(bytes)
            .map_err(|_| FinderError::MalformedRecord("record shorter than its header"))?;
        let name = FileName::parse(rest, header.file_name_length.get())?;
        Ok(Self { header, name })
    }
}

/// A UTF-16 file name borrowed from a directory record. Not nul-terminated.
#[derive(Clone, Copy)]
pub struct FileName<'a>(&'a [u16_le]);

impl<'a> FileName<'a> {
    fn parse(bytes: &'a [u8], byte_length: u32) -> Result<Self, FinderError> {
        let name_bytes = bytes
            .get(..byte_length as usize)
            .ok_or(FinderError::MalformedRecord("file name runs past the written bytes"))?;
        let units = <[u16_le]>::ref_from_bytes(name_bytes)
            .map_err(|_| FinderError::MalformedRecord("file name has an odd byte length"))?;
        Ok(Self(units))
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn units(self) -> impl Iterator<Item = u16> + 'a {
        self.0.iter().map(|unit| unit.get())
    }

    fn chars(self) -> impl Iterator<Item = char> + 'a {
        char::decode_utf16(self.units()).map(|c| c.unwrap_or(REPLACEMENT_CHARACTER))
    }

    /// Decodes the name, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        self.chars().collect()
    }

    #[cfg(windows)]
    pub fn to_os_string(&self) -> std::ffi::OsString {
        use std::os::windows::ffi::OsStringExt;
        let units: Vec<u16> = self.units().collect();
        std::ffi::OsString::from_wide(&units)
    }

    /// True for the `.` and `..` entries every non-root directory reports.
    pub fn is_dot_entry(&self) -> bool {
        matches!(self.0, [dot] if dot.get() == u16::from(b'.'))
            || matches!(self.0, [a, b] if a.get() == u16::from(b'.') && b.get() == u16::from(b'.'))
    }
}

impl PartialEq<str> for FileName<'_> {
    fn eq(&self, other: &str) -> bool {
        self.units().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for FileName<'_> {
    fn eq(&self, other: &&str) -> bool {
        PartialEq::<str>::eq(self, *other)
    }
}

impl fmt::Display for FileName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|c| f.write_char(c))
    }
}

impl fmt::Debug for FileName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

/// Serializes a record header followed by its UTF-16 name, as the kernel
/// lays it out.
pub(crate) fn encode_record<H: IntoBytes + Immutable>(header: &H, name: &[u16], out: &mut [u8]) -> Option<usize> {
    let header_bytes = header.as_bytes();
    let total = header_bytes.len() + name.len() * size_of::<u16>();
    let out = out.get_mut(..total)?;
    let (head, tail) = out.split_at_mut(header_bytes.len());
    head.copy_from_slice(header_bytes);
    for (chunk, unit) in tail.chunks_exact_mut(2).zip(name) {
        chunk.copy_from_slice(&unit.to_le_bytes());
    }
    Some(total)
}
