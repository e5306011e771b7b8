//! The buffered single-entry query loop shared by every finder.

use crate::buffer::ScanBuffer;
use crate::error::FinderError;
use crate::record::{DirectoryRecord, FileName, InformationClass, NamesRecord};
use crate::status::{NtStatus, StatusClass};
#[cfg(feature = "logging")]
use tracing;

/// Status and byte count reported by one directory query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryResult {
    pub status: NtStatus,
    /// Bytes written to the buffer.
    pub information: usize,
}

impl QueryResult {
    pub fn written(information: usize) -> Self {
        Self {
            status: NtStatus::SUCCESS,
            information,
        }
    }

    pub fn status(status: NtStatus) -> Self {
        Self {
            status,
            information: 0,
        }
    }
}

/// An open directory that can be asked for its next matching entry.
pub trait DirectorySource {
    /// Writes at most one record of `class` for the next entry matching
    /// `pattern` into `buffer`.
    ///
    /// As with the kernel, the pattern only takes effect on the first query
    /// and on queries with `restart_scan` set.
    fn query(
        &mut self,
        buffer: &mut [u8],
        class: InformationClass,
        pattern: &[u16],
        restart_scan: bool,
    ) -> QueryResult;

    /// Releases the underlying handle. Called at most once.
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Owns a directory source and the scan buffer records are read from.
///
/// Both are released exactly once: by [`DirectoryScanner::close`], or on drop
/// if `close` was never called.
pub struct DirectoryScanner<S: DirectorySource> {
    source: S,
    buffer: ScanBuffer,
    directory: String,
    pattern: Vec<u16>,
    released: bool,
}

impl<S: DirectorySource> DirectoryScanner<S> {
    pub fn new(source: S, directory: impl Into<String>, buffer_length: usize) -> Result<Self, FinderError> {
        let directory = directory.into();
        let buffer = ScanBuffer::new(buffer_length)?;
        #[cfg(feature = "logging")]
        tracing::debug!("Scanning {} with a {} byte buffer", directory, buffer_length);
        Ok(Self {
            source,
            buffer,
            directory,
            pattern: Vec::new(),
            released: false,
        })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Queries for the next entry matching `pattern`.
    ///
    /// Returns `Ok(None)` once nothing more matches. The record borrows the
    /// scan buffer and is overwritten by the next query.
    pub fn find_next<'s, R: DirectoryRecord<'s>>(
        &'s mut self,
        pattern: &str,
        restart_scan: bool,
    ) -> Result<Option<R>, FinderError> {
        self.pattern.clear();
        self.pattern.extend(pattern.encode_utf16());
        self.query(restart_scan)
    }

    /// Like [`find_next`](Self::find_next) for a pattern already in UTF-16.
    pub fn find_next_wide<'s, R: DirectoryRecord<'s>>(
        &'s mut self,
        pattern: &[u16],
        restart_scan: bool,
    ) -> Result<Option<R>, FinderError> {
        self.pattern.clear();
        self.pattern.extend_from_slice(pattern);
        self.query(restart_scan)
    }

    /// Name of the next entry matching `pattern`, using the names-only record.
    pub fn find_next_name(&mut self, pattern: &str, restart_scan: bool) -> Result<Option<FileName<'_>>, FinderError> {
        Ok(self
            .find_next::<NamesRecord<'_>>(pattern, restart_scan)?
            .map(|record| record.name))
    }

    fn query<'s, R: DirectoryRecord<'s>>(&'s mut self, restart_scan: bool) -> Result<Option<R>, FinderError> {
        // UNICODE_STRING lengths are u16 byte counts.
        if self.pattern.len() > usize::from(u16::MAX) / size_of::<u16>() {
            return Err(FinderError::PatternTooLong {
                units: self.pattern.len(),
            });
        }
        if self.buffer.len() < R::HEADER_SIZE {
            return Err(FinderError::InvalidBufferLength {
                length: self.buffer.len(),
                reason: "smaller than one record header",
            });
        }

        let result = self.source.query(
            self.buffer.as_mut_bytes(),
            R::CLASS,
            &self.pattern,
            restart_scan,
        );

        match result.status.classify() {
            StatusClass::Record => {
                debug_assert_ne!(result.information, 0);
                let this: &'s Self = self;
                let written = &this.buffer.as_bytes()[..result.information.min(this.buffer.len())];
                R::parse(written).map(Some)
            }
            StatusClass::Exhausted => {
                #[cfg(feature = "logging")]
                tracing::debug!("No more matches in {} ({})", self.directory, result.status);
                Ok(None)
            }
            StatusClass::Failed => {
                #[cfg(feature = "logging")]
                tracing::debug!("Query on {} failed with {}", self.directory, result.status);
                Err(FinderError::query(result.status))
            }
        }
    }

    /// Releases the directory handle and the scan buffer.
    pub fn close(mut self) -> Result<(), FinderError> {
        self.release()
            .map_err(|e| FinderError::io(self.directory.clone(), e))
    }

    fn release(&mut self) -> std::io::Result<()> {
        if std::mem::replace(&mut self.released, true) {
            return Ok(());
        }
        #[cfg(feature = "logging")]
        tracing::debug!("Releasing handle for {}", self.directory);
        self.source.close()
    }
}

impl<S: DirectorySource> Drop for DirectoryScanner<S> {
    fn drop(&mut self) {
        if let Err(_e) = self.release() {
            #[cfg(feature = "logging")]
            tracing::debug!("Failed to release handle for {}: {}", self.directory, _e);
        }
    }
}

impl<S: DirectorySource> std::fmt::Debug for DirectoryScanner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryScanner")
            .field("directory", &self.directory)
            .field("buffer", &self.buffer)
            .field("released", &self.released)
            .finish()
    }
}
