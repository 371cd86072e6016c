#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runners shared by the binaries.
pub mod apps;
/// Override table and run configuration.
pub mod config;
/// Centralized constants used across identity, extraction, and reports.
pub mod constants;
/// Dialogue record and source file types.
pub mod data;
/// `AI_Output` call extraction.
pub mod extract;
/// Character and collection grouping of extracted records.
pub mod grouping;
/// File name to character name resolution.
pub mod identity;
/// Batch orchestration across collections.
pub mod pipeline;
/// Spreadsheet layout and workbook rendering.
pub mod report;
/// Collection sources (directories today, in-memory for tests).
pub mod source;
/// Input transports used by sources.
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{ExtractorConfig, OverrideTable};
pub use data::{DialogueRecord, SourceFile};
pub use errors::DialogueError;
pub use extract::{CallMatch, call_matches, extract_records};
pub use grouping::{CharacterSheets, DialogueGrouping};
pub use identity::{IdentityResolver, dialogue_key, normalize_character_name};
pub use pipeline::{DialoguePipeline, RunSummary};
pub use report::{ReportRenderer, SheetLayout};
pub use source::{DialogueSource, DirectorySource, InMemorySource};
pub use types::{
    CharacterName, CollectionName, DialogueKey, FileKey, LineText, OutputName, SpeakerToken,
};
