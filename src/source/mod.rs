//! Collection sources.
//!
//! A source is one collection of script files: an input directory on disk, or an
//! in-memory fixture. Each source returns its files fully decoded and in a fixed
//! order; the pipeline processes sources in the order they were registered.

use crate::data::SourceFile;
use crate::errors::DialogueError;

/// Filesystem-backed collection source.
pub mod directory;

pub use directory::DirectorySource;

/// Pipeline-facing collection interface.
pub trait DialogueSource: Send + Sync {
    /// Collection name, used as the sheet name.
    fn collection(&self) -> &str;

    /// Load every script file of the collection.
    ///
    /// Returned order is the encounter order used for row ordering and must be
    /// stable for unchanged inputs.
    fn load(&self) -> Result<Vec<SourceFile>, DialogueError>;
}

/// Simple in-memory source for tests and ad hoc runs.
pub struct InMemorySource {
    collection: String,
    files: Vec<(String, String)>,
}

impl InMemorySource {
    /// Create an empty collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            files: Vec::new(),
        }
    }

    /// Add a file with already-decoded text. Files are returned in insertion order.
    pub fn with_file(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.push((file_name.into(), text.into()));
        self
    }
}

impl DialogueSource for InMemorySource {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn load(&self) -> Result<Vec<SourceFile>, DialogueError> {
        Ok(self
            .files
            .iter()
            .map(|(file_name, text)| SourceFile::new(file_name, &self.collection, text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_source_keeps_insertion_order() {
        let source = InMemorySource::new("Gothic")
            .with_file("DIA_Lares_009.d", "b")
            .with_file("DIA_Diego_003.d", "a");
        let files = source.load().unwrap();
        assert_eq!(source.collection(), "Gothic");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].key, "dia_lares_009.d");
        assert_eq!(files[1].collection, "Gothic");
    }
}
