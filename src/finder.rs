use crate::entry::FileSystemEntry;
use crate::error::FinderError;
use crate::native::NativeDirectory;
use crate::options::FinderOptions;
use crate::record::FullDirRecord;
use crate::scanner::{DirectoryScanner, DirectorySource};
use crate::types::{FindResult, FoundEntry};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing;

/// Turns a borrowed entry into an owned result, or rejects it.
pub trait TransformEntry {
    type Output;
    fn transform(&mut self, entry: &FileSystemEntry<'_>) -> Option<Self::Output>;
}

impl<T, F> TransformEntry for F
where
    F: FnMut(&FileSystemEntry<'_>) -> Option<T>,
{
    type Output = T;
    fn transform(&mut self, entry: &FileSystemEntry<'_>) -> Option<T> {
        self(entry)
    }
}

/// Copies every entry into a [`FoundEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntoFoundEntry;

impl TransformEntry for IntoFoundEntry {
    type Output = FoundEntry;
    fn transform(&mut self, entry: &FileSystemEntry<'_>) -> Option<FoundEntry> {
        Some(entry.to_found_entry())
    }
}

enum Step<T> {
    Found(T),
    Rejected,
    Exhausted,
}

struct Roots {
    directory: String,
    root_directory: String,
    original_root_directory: String,
}

/// Finds entries in one directory by pattern, one query at a time.
pub struct FileFinder<F: TransformEntry, S: DirectorySource = NativeDirectory> {
    scanner: DirectoryScanner<S>,
    roots: Roots,
    transform: F,
}

impl<F: TransformEntry> FileFinder<F, NativeDirectory> {
    /// Opens `options.directory` through the native API.
    pub fn open(options: &FinderOptions, transform: F) -> Result<Self, FinderError> {
        let source = NativeDirectory::open(&options.directory)?;
        Self::with_source(source, options, transform)
    }
}

impl<F: TransformEntry, S: DirectorySource> FileFinder<F, S> {
    pub fn with_source(source: S, options: &FinderOptions, transform: F) -> Result<Self, FinderError> {
        let scanner = DirectoryScanner::new(source, options.directory.as_str(), options.buffer_length)?;
        Ok(Self {
            scanner,
            roots: Roots {
                directory: options.directory.clone(),
                root_directory: options.root().to_owned(),
                original_root_directory: options.original_root().to_owned(),
            },
            transform,
        })
    }

    pub fn directory(&self) -> &str {
        &self.roots.directory
    }

    /// Finds the next entry matching `pattern`.
    ///
    /// Returns `Ok(None)` when nothing more matches or when the transform
    /// rejects the entry; use [`matches`](Self::matches) to skip rejections.
    pub fn find_match(&mut self, pattern: &str) -> Result<Option<F::Output>, FinderError> {
        self.find_match_with_restart(pattern, false)
    }

    /// Like [`find_match`](Self::find_match), optionally restarting the scan
    /// from the first entry with a new pattern.
    pub fn find_match_with_restart(
        &mut self,
        pattern: &str,
        restart_scan: bool,
    ) -> Result<Option<F::Output>, FinderError> {
        match self.step(pattern, restart_scan)? {
            Step::Found(result) => Ok(Some(result)),
            Step::Rejected | Step::Exhausted => Ok(None),
        }
    }

    /// Iterates over every remaining match, skipping entries the transform
    /// rejects.
    pub fn matches<'f>(&'f mut self, pattern: &'f str) -> Matches<'f, F, S> {
        Matches {
            finder: self,
            pattern,
            done: false,
        }
    }

    fn step(&mut self, pattern: &str, restart_scan: bool) -> Result<Step<F::Output>, FinderError> {
        let Some(record) = self
            .scanner
            .find_next::<FullDirRecord<'_>>(pattern, restart_scan)?
        else {
            return Ok(Step::Exhausted);
        };
        let entry = FileSystemEntry::new(
            record,
            &self.roots.directory,
            &self.roots.root_directory,
            &self.roots.original_root_directory,
        );
        Ok(match self.transform.transform(&entry) {
            Some(result) => Step::Found(result),
            None => Step::Rejected,
        })
    }

    /// Releases the directory handle and scan buffer now rather than on drop.
    pub fn close(self) -> Result<(), FinderError> {
        self.scanner.close()
    }
}

/// Iterator returned by [`FileFinder::matches`]. Ends after the first error.
pub struct Matches<'f, F: TransformEntry, S: DirectorySource> {
    finder: &'f mut FileFinder<F, S>,
    pattern: &'f str,
    done: bool,
}

impl<F: TransformEntry, S: DirectorySource> Iterator for Matches<'_, F, S> {
    type Item = Result<F::Output, FinderError>;
    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.finder.step(self.pattern, false) {
                Ok(Step::Found(result)) => return Some(Ok(result)),
                Ok(Step::Rejected) => continue,
                Ok(Step::Exhausted) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Collects every entry matching `pattern` in `options.directory` using the
/// native API.
pub fn find(options: &FinderOptions, pattern: &str) -> Result<FindResult, FinderError> {
    let source = NativeDirectory::open(&options.directory)?;
    find_with_source(source, options, pattern)
}

/// Collects every entry matching `pattern` from `source`.
pub fn find_with_source<S: DirectorySource>(
    source: S,
    options: &FinderOptions,
    pattern: &str,
) -> Result<FindResult, FinderError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Finding {:?} in {}", pattern, options.directory);
    let mut finder = FileFinder::with_source(source, options, IntoFoundEntry)?;
    let entries = finder.matches(pattern).collect::<Result<Vec<_>, _>>()?;
    finder.close()?;
    Ok(FindResult {
        directory: PathBuf::from(&options.directory),
        pattern: pattern.to_owned(),
        entries,
    })
}
