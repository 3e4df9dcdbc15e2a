//! File Manifest: the ordered set of files produced for one run

pub mod builder;

use serde_json::Value;

pub use builder::{build, BuildError, PackageJson, SCAFFOLD_DIRS};

/// How an entry's content is represented before it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    StructuredData,
}

/// Entry content
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Text(String),
    /// JSON document, written two-space indented with a trailing newline
    Structured(Value),
}

impl FileContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            FileContent::Text(_) => ContentKind::Text,
            FileContent::Structured(_) => ContentKind::StructuredData,
        }
    }

    /// Bytes as they land on disk
    pub fn render(&self) -> Result<String, serde_json::Error> {
        match self {
            FileContent::Text(text) => Ok(text.clone()),
            FileContent::Structured(value) => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}

/// One file of the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// Relative path with `/` separators
    pub path: String,
    pub content: FileContent,
}

impl ManifestEntry {
    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }
}

/// The builder tried to emit the same path twice
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    #[error("duplicate manifest path '{0}'")]
    DuplicatePath(String),

    #[error("manifest path '{0}' must be relative and must not leave the project directory")]
    InvalidPath(String),
}

/// Ordered, path-unique list of files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileManifest {
    entries: Vec<ManifestEntry>,
}

impl FileManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, rejecting duplicate or escaping paths
    pub fn push(&mut self, path: impl Into<String>, content: FileContent) -> Result<(), ManifestError> {
        let path = path.into();
        if path.is_empty()
            || path.starts_with('/')
            || path.split('/').any(|segment| segment == ".." || segment.is_empty())
        {
            return Err(ManifestError::InvalidPath(path));
        }
        if self.contains(&path) {
            return Err(ManifestError::DuplicatePath(path));
        }
        self.entries.push(ManifestEntry { path, content });
        Ok(())
    }

    pub fn push_text(&mut self, path: impl Into<String>, text: String) -> Result<(), ManifestError> {
        self.push(path, FileContent::Text(text))
    }

    pub fn push_structured(
        &mut self,
        path: impl Into<String>,
        value: Value,
    ) -> Result<(), ManifestError> {
        self.push(path, FileContent::Structured(value))
    }

    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileManifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
