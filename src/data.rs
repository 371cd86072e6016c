use serde::{Deserialize, Serialize};

pub use crate::types::{CollectionName, FileKey, LineText, OutputName, SpeakerToken};

/// One dialogue line extracted from an `AI_Output` call.
///
/// Records are created once per match and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    /// Tag taken from the trailing comment (`Output Name` column).
    pub output_name: OutputName,
    /// Spoken line, trimmed (`What character says` column).
    pub line: LineText,
    /// First call argument (`Who says it` column).
    pub speaker: SpeakerToken,
    /// Reserved for manual annotation; always empty on extraction.
    #[serde(default)]
    pub chapter: String,
    /// Reserved for manual annotation; always empty on extraction.
    #[serde(default)]
    pub condition: String,
}

impl DialogueRecord {
    /// Build a record with empty chapter and condition fields.
    pub fn new(
        output_name: impl Into<OutputName>,
        line: impl Into<LineText>,
        speaker: impl Into<SpeakerToken>,
    ) -> Self {
        Self {
            output_name: output_name.into(),
            line: line.into(),
            speaker: speaker.into(),
            chapter: String::new(),
            condition: String::new(),
        }
    }

    /// Cell values in column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.output_name.as_str(),
            self.line.as_str(),
            self.speaker.as_str(),
            self.chapter.as_str(),
            self.condition.as_str(),
        ]
    }
}

/// A decoded script file read from one collection.
///
/// Several `SourceFile`s may share a `key` when the same file name appears in
/// more than one collection; they resolve to the same character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// File name with its original casing.
    pub file_name: String,
    /// Lowercased file name.
    pub key: FileKey,
    /// Collection (sheet) the file was read from.
    pub collection: CollectionName,
    /// Decoded file contents.
    pub text: String,
}

impl SourceFile {
    /// Create a source file, deriving the lowercase key from `file_name`.
    pub fn new(
        file_name: impl Into<String>,
        collection: impl Into<CollectionName>,
        text: impl Into<String>,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            key: file_name.to_lowercase(),
            file_name,
            collection: collection.into(),
            text: text.into(),
        }
    }
}
