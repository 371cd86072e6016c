//! Per-character workbook rendering.
//!
//! `SheetLayout` decides the content and style of every cell without touching a
//! spreadsheet library; `ReportRenderer` maps those decisions onto
//! `rust_xlsxwriter` formats and writes one `.xlsx` file per character.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, XlsxError};
use tracing::info;

use crate::constants::report::{
    BORDER_RGB, COLUMN_WIDTHS, HEADER_FILL_RGB, HEADERS, OTHER_FILL_RGB, SELF_FILL_RGB,
    SHEET_NAME_FORBIDDEN, SHEET_NAME_MAX_CHARS, SPEAKER_SELF, SPEAKERS_OTHER, WORKBOOK_EXTENSION,
};
use crate::data::DialogueRecord;
use crate::errors::DialogueError;
use crate::grouping::{CharacterSheets, DialogueGrouping};
use crate::types::CharacterName;

const COLUMN_COUNT: usize = HEADERS.len();

/// Background tint of a data row, chosen from the speaker token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowTint {
    /// No fill.
    None,
    /// Line spoken by `self`.
    SelfSpeaker,
    /// Line spoken by `hero` or `other`.
    OtherSpeaker,
}

impl RowTint {
    /// Tint for a speaker token, compared trimmed and case-insensitively.
    pub fn for_speaker(speaker: &str) -> Self {
        let speaker = speaker.trim().to_lowercase();
        if speaker == SPEAKER_SELF {
            RowTint::SelfSpeaker
        } else if SPEAKERS_OTHER.contains(&speaker.as_str()) {
            RowTint::OtherSpeaker
        } else {
            RowTint::None
        }
    }

    fn fill_rgb(self) -> Option<u32> {
        match self {
            RowTint::None => None,
            RowTint::SelfSpeaker => Some(SELF_FILL_RGB),
            RowTint::OtherSpeaker => Some(OTHER_FILL_RGB),
        }
    }
}

/// Line style of one cell edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Inner edge.
    Dotted,
    /// Outer edge of the table.
    Medium,
}

/// Edge styles of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct CellBorders {
    pub top: EdgeStyle,
    pub bottom: EdgeStyle,
    pub left: EdgeStyle,
    pub right: EdgeStyle,
}

/// Presentation of one cell. Every cell wraps text and is vertically centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    /// Bold font.
    pub bold: bool,
    /// Italic font.
    pub italic: bool,
    /// Solid background fill, `0xRRGGBB`.
    pub fill_rgb: Option<u32>,
    /// Edge styles.
    pub borders: CellBorders,
}

/// Content and styling of one sheet: a header row plus one row per record.
pub struct SheetLayout<'a> {
    name: String,
    records: &'a [DialogueRecord],
}

impl<'a> SheetLayout<'a> {
    /// Layout for the records of one collection.
    pub fn new(collection: &str, records: &'a [DialogueRecord]) -> Self {
        Self {
            name: sheet_name(collection),
            records,
        }
    }

    /// Sheet name, truncated to the spreadsheet limit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row count including the header row.
    pub fn row_count(&self) -> usize {
        self.records.len() + 1
    }

    /// Always the five report columns.
    pub fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    /// Cell text. Row 0 is the header.
    pub fn value(&self, row: usize, col: usize) -> &str {
        match row {
            0 => HEADERS[col],
            _ => self.records[row - 1].cells()[col],
        }
    }

    /// Speaker tint of a row. The header row is untinted.
    pub fn tint(&self, row: usize) -> RowTint {
        match row {
            0 => RowTint::None,
            _ => RowTint::for_speaker(&self.records[row - 1].speaker),
        }
    }

    /// Font, fill and borders of one cell.
    pub fn style(&self, row: usize, col: usize) -> CellStyle {
        let last_row = self.row_count() - 1;
        let edge = |outer: bool| {
            if outer {
                EdgeStyle::Medium
            } else {
                EdgeStyle::Dotted
            }
        };
        let borders = CellBorders {
            top: edge(row == 0),
            bottom: edge(row == last_row),
            left: edge(col == 0),
            right: edge(col == COLUMN_COUNT - 1),
        };
        if row == 0 {
            return CellStyle {
                bold: true,
                italic: false,
                fill_rgb: Some(HEADER_FILL_RGB),
                borders,
            };
        }
        CellStyle {
            bold: col == 0,
            italic: col == 1,
            fill_rgb: self.tint(row).fill_rgb(),
            borders,
        }
    }
}

/// Truncate a collection name to the maximum sheet-name length (in characters).
pub fn sheet_name(collection: &str) -> String {
    collection.chars().take(SHEET_NAME_MAX_CHARS).collect()
}

/// Workbook file name for a character, with path-hostile characters replaced.
pub fn workbook_file_name(character: &str) -> String {
    let safe: String = character
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    format!("{safe}.{WORKBOOK_EXTENSION}")
}

/// Check the truncated sheet names of one character before anything is written.
///
/// Names must be non-empty, free of the characters spreadsheet applications
/// reject, not wrapped in apostrophes, and unique ignoring case.
pub fn check_sheet_names(character: &str, sheets: &CharacterSheets) -> Result<(), DialogueError> {
    let invalid = |sheet: &str, reason: String| DialogueError::SheetName {
        character: character.to_string(),
        sheet: sheet.to_string(),
        reason,
    };
    let mut seen: HashMap<String, &str> = HashMap::new();
    for collection in sheets.keys() {
        let name = sheet_name(collection);
        if name.is_empty() {
            return Err(invalid(collection, "sheet name is empty".to_string()));
        }
        if let Some(ch) = name.chars().find(|ch| SHEET_NAME_FORBIDDEN.contains(ch)) {
            return Err(invalid(collection, format!("contains forbidden character '{ch}'")));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(invalid(collection, "starts or ends with an apostrophe".to_string()));
        }
        if let Some(first) = seen.insert(name.to_lowercase(), collection) {
            return Err(invalid(
                collection,
                format!("truncated name '{name}' clashes with collection '{first}'"),
            ));
        }
    }
    Ok(())
}

/// Assign an output path to every character.
///
/// Rejects case-insensitive file name collisions and invalid sheet names.
pub fn plan_output_paths(
    grouping: &DialogueGrouping,
    output_dir: &Path,
) -> Result<Vec<(CharacterName, PathBuf)>, DialogueError> {
    let mut claimed: HashMap<String, &CharacterName> = HashMap::new();
    let mut plan = Vec::with_capacity(grouping.character_count());
    for character in grouping.characters() {
        let file_name = workbook_file_name(character);
        if let Some(first) = claimed.insert(file_name.to_lowercase(), character) {
            return Err(DialogueError::OutputCollision {
                first: first.clone(),
                second: character.clone(),
                file_name,
            });
        }
        if let Some(sheets) = grouping.sheets(character) {
            check_sheet_names(character, sheets)?;
        }
        plan.push((character.clone(), output_dir.join(file_name)));
    }
    Ok(plan)
}

/// Writes one workbook per character into an output directory.
pub struct ReportRenderer {
    output_dir: PathBuf,
}

impl ReportRenderer {
    /// Renderer writing into `output_dir` (created on demand).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render every character of a finished grouping and return the written paths.
    ///
    /// Output paths and sheet names are checked before anything is written.
    pub fn render_all(&self, grouping: &DialogueGrouping) -> Result<Vec<PathBuf>, DialogueError> {
        let plan = plan_output_paths(grouping, &self.output_dir)?;
        fs::create_dir_all(&self.output_dir)?;
        let mut written = Vec::with_capacity(plan.len());
        for (character, path) in plan {
            if let Some(sheets) = grouping.sheets(&character) {
                write_workbook(&character, sheets, &path)?;
                written.push(path);
            }
        }
        Ok(written)
    }
}

/// Write one character's sheets to `path`.
pub fn write_workbook(
    character: &str,
    sheets: &CharacterSheets,
    path: &Path,
) -> Result<(), DialogueError> {
    let render_err = |err: XlsxError| DialogueError::Render {
        character: character.to_string(),
        reason: err.to_string(),
    };
    let mut workbook = Workbook::new();
    for (collection, records) in sheets {
        let layout = SheetLayout::new(collection, records);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(layout.name()).map_err(render_err)?;
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(render_err)?;
        }
        for row in 0..layout.row_count() {
            for col in 0..layout.column_count() {
                let format = cell_format(&layout.style(row, col));
                let value = layout.value(row, col);
                if value.is_empty() {
                    worksheet
                        .write_blank(row as u32, col as u16, &format)
                        .map_err(render_err)?;
                } else {
                    worksheet
                        .write_string_with_format(row as u32, col as u16, value, &format)
                        .map_err(render_err)?;
                }
            }
        }
        worksheet.set_freeze_panes(1, 0).map_err(render_err)?;
    }
    workbook.save(path).map_err(render_err)?;
    info!(
        character,
        path = %path.display(),
        sheets = sheets.len(),
        "saved workbook"
    );
    Ok(())
}

fn cell_format(style: &CellStyle) -> Format {
    let mut format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter)
        .set_border_top(border(style.borders.top))
        .set_border_bottom(border(style.borders.bottom))
        .set_border_left(border(style.borders.left))
        .set_border_right(border(style.borders.right))
        .set_border_color(Color::RGB(BORDER_RGB));
    if style.bold {
        format = format.set_bold();
    }
    if style.italic {
        format = format.set_italic();
    }
    if let Some(rgb) = style.fill_rgb {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb));
    }
    format
}

fn border(edge: EdgeStyle) -> FormatBorder {
    match edge {
        EdgeStyle::Dotted => FormatBorder::Dotted,
        EdgeStyle::Medium => FormatBorder::Medium,
    }
}
