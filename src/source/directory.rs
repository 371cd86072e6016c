use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data::SourceFile;
use crate::errors::DialogueError;
use crate::source::DialogueSource;
use crate::transport::fs::{ScriptDirectory, collection_name, read_windows_1252};
use crate::types::CollectionName;

/// One input directory of `*.d` scripts, listed non-recursively.
pub struct DirectorySource {
    root: PathBuf,
    collection: CollectionName,
    follow_links: bool,
}

impl DirectorySource {
    /// Create a source for `root`, naming the collection after the directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            collection: collection_name(&root),
            root,
            follow_links: true,
        }
    }

    /// Override the collection name derived from the directory.
    pub fn with_collection(mut self, collection: impl Into<CollectionName>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Override whether symlinked files are followed.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Directory being listed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> Result<SourceFile, DialogueError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let text = read_windows_1252(path)?;
        debug!(
            collection = %self.collection,
            file = %file_name,
            bytes = text.len(),
            "read script file"
        );
        Ok(SourceFile::new(file_name, &self.collection, text))
    }
}

impl DialogueSource for DirectorySource {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn load(&self) -> Result<Vec<SourceFile>, DialogueError> {
        let paths = ScriptDirectory::new(&self.root)
            .with_follow_symlinks(self.follow_links)
            .script_files()?;
        let files = paths
            .iter()
            .map(|path| self.read_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            collection = %self.collection,
            root = %self.root.display(),
            files = files.len(),
            "loaded collection"
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_decoded_files_in_name_order() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Input_Gothic");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("DIA_Lares_009.d"), b"b").unwrap();
        fs::write(root.join("DIA_Diego_003.d"), b"M\xfcller").unwrap();
        fs::write(root.join("readme.txt"), b"skip").unwrap();

        let source = DirectorySource::new(&root);
        let files = source.load().unwrap();
        assert_eq!(source.collection(), "Gothic");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "DIA_Diego_003.d");
        assert_eq!(files[0].text, "Müller");
        assert_eq!(files[1].key, "dia_lares_009.d");
    }

    #[test]
    fn undecodable_file_fails_the_collection() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("DIA_Bad.d"), b"\x90").unwrap();
        let err = DirectorySource::new(temp.path())
            .with_collection("Broken")
            .load()
            .unwrap_err();
        assert!(matches!(err, DialogueError::Decode { byte: 0x90, .. }));
    }
}
