/// Constants used when deriving character names from script file names.
pub mod identity {
    /// File-type suffix removed when building a dialogue key.
    pub const SCRIPT_SUFFIX: &str = ".d";
    /// Dialogue prefix token removed when building a dialogue key.
    pub const DIALOGUE_PREFIX: &str = "DIA_";
    /// Leading segment that marks the following segment as the character name.
    pub const ADDON_MARKER: &str = "addon";
    /// Separator between dialogue-key segments.
    pub const SEGMENT_SEPARATOR: char = '_';
}

/// Constants used by the `AI_Output` call matcher.
pub mod extract {
    /// Call name that starts every candidate match.
    pub const CALL_NAME: &str = "AI_Output";
    /// Line comment marker that may precede the output tag.
    pub const COMMENT_MARKER: &str = "//";
}

/// Constants used by collection scanning and decoding.
pub mod scan {
    /// Script suffix matched case-insensitively when listing a collection.
    pub const SCRIPT_EXTENSION: &str = ".d";
    /// Directory prefix stripped when naming a collection.
    pub const COLLECTION_DIR_PREFIX: &str = "Input_";
    /// Bytes with no assignment in windows-1252.
    pub const WINDOWS_1252_UNASSIGNED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];
}

/// Default run configuration.
pub mod config {
    /// Input directories scanned when none are configured.
    pub const DEFAULT_INPUT_DIRS: [&str; 3] = ["Input_Gothic", "Input_Gothic2", "Input_NotR"];
    /// Override table read when none is configured.
    pub const DEFAULT_OVERRIDE_FILE: &str = "config.yaml";
    /// Directory that receives one workbook per character.
    pub const DEFAULT_OUTPUT_DIR: &str = "Output";
}

/// Constants used by the workbook layout.
pub mod report {
    /// Header labels in column order.
    pub const HEADERS: [&str; 5] = [
        "Output Name",
        "What character says",
        "Who says it",
        "Chapter",
        "Condition",
    ];
    /// Column widths in character units, matching `HEADERS`.
    pub const COLUMN_WIDTHS: [f64; 5] = [28.5, 33.5, 21.25, 11.38, 28.88];
    /// Maximum sheet-name length accepted by spreadsheet applications.
    pub const SHEET_NAME_MAX_CHARS: usize = 31;
    /// Characters spreadsheet applications reject in sheet names.
    pub const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
    /// Extension of the written workbooks.
    pub const WORKBOOK_EXTENSION: &str = "xlsx";
    /// Header row fill.
    pub const HEADER_FILL_RGB: u32 = 0xD9D9D9;
    /// Row fill for lines spoken by `self`.
    pub const SELF_FILL_RGB: u32 = 0xE2EFDA;
    /// Row fill for lines spoken by `hero` or `other`.
    pub const OTHER_FILL_RGB: u32 = 0xDEEAF6;
    /// Border color for every edge.
    pub const BORDER_RGB: u32 = 0x000000;
    /// Speaker token that tints a row with `SELF_FILL_RGB`.
    pub const SPEAKER_SELF: &str = "self";
    /// Speaker tokens that tint a row with `OTHER_FILL_RGB`.
    pub const SPEAKERS_OTHER: [&str; 2] = ["hero", "other"];
}
