use crate::buffer::DEFAULT_BUFFER_LENGTH;
use crate::path;
use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderOptions {
    pub directory: String,
    pub root_directory: Option<String>,
    pub original_root_directory: Option<String>,
    pub buffer_length: usize,
}
impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            directory: String::from("."),
            root_directory: None,
            original_root_directory: None,
            buffer_length: DEFAULT_BUFFER_LENGTH,
        }
    }
}
impl FinderOptions {
    /// The root as the caller specified it; the enumerated directory unless set.
    pub fn original_root(&self) -> &str {
        self.original_root_directory
            .as_deref()
            .unwrap_or(&self.directory)
    }
    /// The root with its trailing separator trimmed. When no root was given
    /// at all, the enumerated directory itself, so top-level entries have no
    /// relative part.
    pub fn root(&self) -> &str {
        match (&self.root_directory, &self.original_root_directory) {
            (Some(root), _) => root,
            (None, Some(original)) => path::trim_ending_directory_separator(original),
            (None, None) => &self.directory,
        }
    }
}
#[derive(Debug, Default)]
pub struct FinderBuilder {
    options: FinderOptions,
}
impl FinderBuilder {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            options: FinderOptions {
                directory: directory.into(),
                ..Default::default()
            },
        }
    }
    pub fn root_directory(mut self, root: impl Into<String>) -> Self {
        self.options.root_directory = Some(root.into());
        self
    }
    pub fn original_root_directory(mut self, root: impl Into<String>) -> Self {
        self.options.original_root_directory = Some(root.into());
        self
    }
    pub fn buffer_length(mut self, length: usize) -> Self {
        self.options.buffer_length = length;
        self
    }
    pub fn build(self) -> FinderOptions {
        self.options
    }
}
