//! Mock tag reader for testing.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::tags::{TagError, TagReader, TagSet};

/// Mock implementation of the TagReader trait.
///
/// Returns pre-configured tags per path and an empty set for anything
/// else. Paths can be marked unreadable.
#[derive(Debug, Default, Clone)]
pub struct MockTagReader {
    tags: HashMap<PathBuf, TagSet>,
    unreadable: HashSet<PathBuf>,
}

impl MockTagReader {
    /// Create a reader that knows no tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `tags` for `path`.
    pub fn with_tags<K, V>(
        mut self,
        path: impl Into<PathBuf>,
        tags: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.tags.insert(path.into(), tags.into_iter().collect());
        self
    }

    /// Fail reads of `path`.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }
}

impl TagReader for MockTagReader {
    fn name(&self) -> &str {
        "mock"
    }

    fn read_tags(&self, path: &Path) -> Result<TagSet, TagError> {
        if self.unreadable.contains(path) {
            return Err(TagError::read_failed(path, "mock failure"));
        }
        Ok(self.tags.get(path).cloned().unwrap_or_default())
    }
}
