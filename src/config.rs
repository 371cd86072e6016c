use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::config::{DEFAULT_INPUT_DIRS, DEFAULT_OUTPUT_DIR, DEFAULT_OVERRIDE_FILE};
use crate::errors::DialogueError;
use crate::types::{CharacterName, FileKey};

/// File name to character name overrides, keyed by lowercased file name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<FileKey, CharacterName>,
}

impl OverrideTable {
    /// Add an override. The file name is lowercased before insertion.
    pub fn insert(&mut self, file_name: impl AsRef<str>, character: impl Into<CharacterName>) {
        self.entries
            .insert(file_name.as_ref().to_lowercase(), character.into());
    }

    /// Look up the override for a lowercased file name.
    pub fn get(&self, key: &str) -> Option<&CharacterName> {
        self.entries.get(key)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no override is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a YAML mapping of file name to character name.
    ///
    /// Entries apply in document order, so among keys that differ only in case
    /// the last one wins. An empty document yields an empty table.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, DialogueError> {
        let raw: Option<IndexMap<String, String>> =
            serde_yaml::from_str(yaml).map_err(|err| DialogueError::OverrideTable {
                path: origin.to_path_buf(),
                reason: err.to_string(),
            })?;
        let mut table = Self::default();
        for (file_name, character) in raw.unwrap_or_default() {
            table.insert(file_name, character);
        }
        Ok(table)
    }

    /// Load overrides from `path`. A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self, DialogueError> {
        let yaml = match fs::read_to_string(path) {
            Ok(yaml) => yaml,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "override table not found; using no overrides");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let table = Self::from_yaml_str(&yaml, path)?;
        info!(path = %path.display(), entries = table.len(), "loaded override table");
        Ok(table)
    }
}

impl<K, V> FromIterator<(K, V)> for OverrideTable
where
    K: AsRef<str>,
    V: Into<CharacterName>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        for (file_name, character) in iter {
            table.insert(file_name, character);
        }
        table
    }
}

/// Top-level run configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Collections to scan, in processing order.
    pub input_dirs: Vec<PathBuf>,
    /// Optional override table; a missing file means no overrides.
    pub override_file: PathBuf,
    /// Directory receiving one workbook per character.
    pub output_dir: PathBuf,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_dirs: DEFAULT_INPUT_DIRS.iter().map(PathBuf::from).collect(),
            override_file: PathBuf::from(DEFAULT_OVERRIDE_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ExtractorConfig {
    /// Replace the scanned collections.
    pub fn with_input_dirs<I, P>(mut self, input_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.input_dirs = input_dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Override the override-table location.
    pub fn with_override_file(mut self, override_file: impl Into<PathBuf>) -> Self {
        self.override_file = override_file.into();
        self
    }

    /// Override the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Load a run configuration from a YAML file. Absent keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, DialogueError> {
        let yaml = fs::read_to_string(path)?;
        serde_yaml::from_str(&yaml).map_err(|err| {
            DialogueError::Configuration(format!("'{}': {err}", path.display()))
        })
    }

    /// Reject configurations that cannot produce a deterministic run.
    pub fn validate(&self) -> Result<(), DialogueError> {
        for (idx, dir) in self.input_dirs.iter().enumerate() {
            if self.input_dirs[..idx].contains(dir) {
                return Err(DialogueError::Configuration(format!(
                    "input directory '{}' is listed more than once",
                    dir.display()
                )));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(DialogueError::Configuration(
                "output directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
