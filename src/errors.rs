use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::CharacterName;

/// Error type for scanning, decoding, configuration, and rendering failures.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("input directory '{}' cannot be listed: {reason}", path.display())]
    InputDirectory { path: PathBuf, reason: String },
    #[error(
        "file '{}' is not valid windows-1252: unassigned byte 0x{byte:02X} at offset {offset}",
        path.display()
    )]
    Decode {
        path: PathBuf,
        byte: u8,
        offset: usize,
    },
    #[error("override table '{}' is invalid: {reason}", path.display())]
    OverrideTable { path: PathBuf, reason: String },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("characters '{first}' and '{second}' both map to output file '{file_name}'")]
    OutputCollision {
        first: CharacterName,
        second: CharacterName,
        file_name: String,
    },
    #[error("sheet '{sheet}' of character '{character}' is invalid: {reason}")]
    SheetName {
        character: CharacterName,
        sheet: String,
        reason: String,
    },
    #[error("failed to render workbook for '{character}': {reason}")]
    Render {
        character: CharacterName,
        reason: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
