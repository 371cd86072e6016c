use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use walkdir::WalkDir;

use crate::constants::scan::{COLLECTION_DIR_PREFIX, SCRIPT_EXTENSION, WINDOWS_1252_UNASSIGNED};
use crate::errors::DialogueError;
use crate::types::CollectionName;

/// Non-recursive listing of the script files directly inside one directory.
pub struct ScriptDirectory {
    root: PathBuf,
    follow_links: bool,
}

impl ScriptDirectory {
    /// Create a listing rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: true,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Root directory of this listing.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Script files directly under the root, sorted by file name.
    ///
    /// Sorting replaces the platform listing order so that row order is
    /// reproducible across machines.
    pub fn script_files(&self) -> Result<Vec<PathBuf>, DialogueError> {
        if !self.root.is_dir() {
            return Err(DialogueError::InputDirectory {
                path: self.root.clone(),
                reason: "not a directory".to_string(),
            });
        }
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| DialogueError::InputDirectory {
                path: self.root.clone(),
                reason: err.to_string(),
            })?;
            if entry.file_type().is_file() && is_script_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// True if the file name ends in the script extension (case-insensitive).
pub fn is_script_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase().ends_with(SCRIPT_EXTENSION))
        .unwrap_or(false)
}

/// Collection name for an input directory: its file name without the `Input_` prefix.
pub fn collection_name(dir: &Path) -> CollectionName {
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.to_string_lossy().to_string());
    name.replace(COLLECTION_DIR_PREFIX, "")
}

/// Read a whole file and decode it as windows-1252.
pub fn read_windows_1252(path: &Path) -> Result<String, DialogueError> {
    let bytes = fs::read(path)?;
    decode_windows_1252(path, &bytes)
}

/// Decode windows-1252 bytes, rejecting the code points the code page leaves unassigned.
pub fn decode_windows_1252(path: &Path, bytes: &[u8]) -> Result<String, DialogueError> {
    if let Some(offset) = bytes
        .iter()
        .position(|byte| WINDOWS_1252_UNASSIGNED.contains(byte))
    {
        return Err(DialogueError::Decode {
            path: path.to_path_buf(),
            byte: bytes[offset],
            offset,
        });
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_only_top_level_script_files_in_name_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("DIA_Lares_009.d"), "").unwrap();
        fs::write(root.join("DIA_Diego_003.D"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("nested/DIA_Hidden.d"), "").unwrap();

        let files = ScriptDirectory::new(root).script_files().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["DIA_Diego_003.D", "DIA_Lares_009.d"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempdir().unwrap();
        let err = ScriptDirectory::new(temp.path().join("Input_Missing"))
            .script_files()
            .unwrap_err();
        assert!(matches!(err, DialogueError::InputDirectory { .. }));
    }

    #[test]
    fn collection_name_strips_input_prefix() {
        assert_eq!(collection_name(Path::new("data/Input_Gothic2")), "Gothic2");
        assert_eq!(collection_name(Path::new("Addon")), "Addon");
    }

    #[test]
    fn decodes_windows_1252_specials() {
        let bytes = b"\"Gr\xfc\xdf dich\" \x80 \x93ok\x94";
        let text = decode_windows_1252(Path::new("a.d"), bytes).unwrap();
        assert_eq!(text, "\"Grüß dich\" € \u{201c}ok\u{201d}");
    }

    #[test]
    fn unassigned_byte_is_a_decode_error() {
        let err = decode_windows_1252(Path::new("bad.d"), b"abc\x81def").unwrap_err();
        match err {
            DialogueError::Decode { byte, offset, .. } => {
                assert_eq!(byte, 0x81);
                assert_eq!(offset, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
