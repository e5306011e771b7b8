use crate::error::FinderError;
use zerocopy::IntoBytes;

/// Default scan buffer size. One record with a `MAX_PATH` name fits with room to spare.
pub const DEFAULT_BUFFER_LENGTH: usize = 1024;

/// Heap buffer the kernel writes records into.
///
/// Backed by `u64` words so records start 8-byte aligned, as the kernel
/// expects of `FileInformation`.
pub struct ScanBuffer {
    words: Vec<u64>,
    len: usize,
}

impl ScanBuffer {
    pub fn new(len: usize) -> Result<Self, FinderError> {
        if len == 0 || u32::try_from(len).is_err() {
            return Err(FinderError::InvalidBufferLength {
                length: len,
                reason: "must be non-zero and fit in 32 bits",
            });
        }
        let mut words = Vec::new();
        words
            .try_reserve_exact(len.div_ceil(size_of::<u64>()))
            .map_err(|_| FinderError::Allocation { bytes: len })?;
        words.resize(len.div_ceil(size_of::<u64>()), 0);
        Ok(Self { words, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.words.as_bytes()[..self.len]
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.words.as_mut_bytes()[..self.len]
    }
}

impl std::fmt::Debug for ScanBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanBuffer").field("len", &self.len).finish()
    }
}
