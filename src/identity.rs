//! Character identity resolution from script file names.
//!
//! A script file name maps to one canonical character name. An override table
//! wins outright; otherwise the name is derived from the dialogue key, upper-casing
//! the segment that carries the character when the key has a numeric id segment.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::OverrideTable;
use crate::constants::identity::{ADDON_MARKER, DIALOGUE_PREFIX, SCRIPT_SUFFIX, SEGMENT_SEPARATOR};
use crate::data::SourceFile;
use crate::types::{CharacterName, DialogueKey, FileKey};

/// Resolves script file names to canonical character names.
#[derive(Clone, Debug, Default)]
pub struct IdentityResolver {
    overrides: OverrideTable,
}

impl IdentityResolver {
    /// Create a resolver backed by `overrides`.
    pub fn new(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    /// Resolve one file name. `key` is the lowercased file name.
    pub fn resolve(&self, file_name: &str, key: &str) -> CharacterName {
        if let Some(name) = self.overrides.get(key) {
            debug!(file = file_name, character = %name, "character name from override");
            return name.clone();
        }
        let name = normalize_character_name(&dialogue_key(file_name));
        debug!(file = file_name, character = %name, "character name from file name");
        name
    }

    /// Resolve every distinct key of `files` exactly once.
    ///
    /// The first file seen for a key supplies the original-case name; later files
    /// sharing the key reuse its result. Output order is first-encounter order.
    pub fn resolve_all<'a, I>(&self, files: I) -> IndexMap<FileKey, CharacterName>
    where
        I: IntoIterator<Item = &'a SourceFile>,
    {
        let mut resolved = IndexMap::new();
        for file in files {
            if !resolved.contains_key(&file.key) {
                let name = self.resolve(&file.file_name, &file.key);
                resolved.insert(file.key.clone(), name);
            }
        }
        resolved
    }
}

/// Strip the script suffix and dialogue prefix from a file name.
///
/// Both tokens are removed wherever they occur, so `DIA_Diego_003.d` becomes
/// `Diego_003`.
pub fn dialogue_key(file_name: &str) -> DialogueKey {
    file_name.replace(SCRIPT_SUFFIX, "").replace(DIALOGUE_PREFIX, "")
}

/// Derive a character name from a dialogue key.
///
/// Keys without an all-digit segment are already canonical. Otherwise the first
/// segment is upper-cased, or the second one when the first is the addon marker.
pub fn normalize_character_name(key: &str) -> CharacterName {
    let mut parts: Vec<String> = key.split(SEGMENT_SEPARATOR).map(str::to_string).collect();
    if parts.len() == 1 || !parts.iter().any(|part| is_digit_segment(part)) {
        return key.to_string();
    }
    let target = if parts[0].eq_ignore_ascii_case(ADDON_MARKER) {
        1
    } else {
        0
    };
    parts[target] = parts[target].to_uppercase();
    parts.join(&SEGMENT_SEPARATOR.to_string())
}

fn is_digit_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit())
}
