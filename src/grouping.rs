//! Two-level record grouping: character, then collection.
//!
//! Both levels keep first-encounter order. The structure is append-only; records
//! are never reordered, deduplicated, or removed once added.

use indexmap::IndexMap;

use crate::data::DialogueRecord;
use crate::types::{CharacterName, CollectionName};

/// Records of one character, keyed by collection (sheet).
pub type CharacterSheets = IndexMap<CollectionName, Vec<DialogueRecord>>;

/// Append-only grouping of dialogue records by character and collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogueGrouping {
    characters: IndexMap<CharacterName, CharacterSheets>,
}

impl DialogueGrouping {
    /// Empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file's records under `(character, collection)`.
    ///
    /// The pair is registered even when `records` is empty, so a file without
    /// matches still yields an (empty) sheet.
    pub fn append<I>(&mut self, character: &str, collection: &str, records: I)
    where
        I: IntoIterator<Item = DialogueRecord>,
    {
        self.sheet_mut(character, collection).extend(records);
    }

    /// Append every pair of `other` after the existing records, in `other`'s order.
    pub fn merge(&mut self, other: DialogueGrouping) {
        for (character, sheets) in other.characters {
            for (collection, records) in sheets {
                self.append(&character, &collection, records);
            }
        }
    }

    fn sheet_mut(&mut self, character: &str, collection: &str) -> &mut Vec<DialogueRecord> {
        self.characters
            .entry(character.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
    }

    /// Sheets of one character, if any file resolved to it.
    pub fn sheets(&self, character: &str) -> Option<&CharacterSheets> {
        self.characters.get(character)
    }

    /// Records of one `(character, collection)` pair.
    pub fn records(&self, character: &str, collection: &str) -> Option<&[DialogueRecord]> {
        self.characters
            .get(character)
            .and_then(|sheets| sheets.get(collection))
            .map(Vec::as_slice)
    }

    /// Character names in first-encounter order.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterName> {
        self.characters.keys()
    }

    /// Characters with their sheets, in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&CharacterName, &CharacterSheets)> {
        self.characters.iter()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Total number of records across all characters and sheets.
    pub fn record_count(&self) -> usize {
        self.characters
            .values()
            .flat_map(|sheets| sheets.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str) -> DialogueRecord {
        DialogueRecord::new(tag, format!("line {tag}"), "self")
    }

    fn tags(records: &[DialogueRecord]) -> Vec<&str> {
        records.iter().map(|r| r.output_name.as_str()).collect()
    }

    #[test]
    fn appends_concatenate_in_encounter_order() {
        let mut grouping = DialogueGrouping::new();
        grouping.append("DIEGO_003", "Gothic", vec![record("f1_a"), record("f1_b")]);
        grouping.append("DIEGO_003", "Gothic", vec![record("f2_a")]);
        let records = grouping.records("DIEGO_003", "Gothic").unwrap();
        assert_eq!(tags(records), vec!["f1_a", "f1_b", "f2_a"]);
    }

    #[test]
    fn identical_records_are_not_deduplicated() {
        let mut grouping = DialogueGrouping::new();
        grouping.append("Xardas", "Gothic", vec![record("same")]);
        grouping.append("Xardas", "Gothic", vec![record("same")]);
        assert_eq!(grouping.record_count(), 2);
    }

    #[test]
    fn keys_keep_first_encounter_order() {
        let mut grouping = DialogueGrouping::new();
        grouping.append("Zuris", "NotR", vec![record("z")]);
        grouping.append("Abuyin", "Gothic2", vec![record("a")]);
        grouping.append("Zuris", "Gothic", vec![record("z2")]);
        let characters: Vec<&str> = grouping.characters().map(String::as_str).collect();
        assert_eq!(characters, vec!["Zuris", "Abuyin"]);
        let sheets: Vec<&str> = grouping
            .sheets("Zuris")
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(sheets, vec!["NotR", "Gothic"]);
    }

    #[test]
    fn empty_batch_registers_empty_sheet() {
        let mut grouping = DialogueGrouping::new();
        grouping.append("Silent", "Gothic", Vec::new());
        assert_eq!(grouping.character_count(), 1);
        assert_eq!(grouping.records("Silent", "Gothic"), Some(&[][..]));
        assert_eq!(grouping.record_count(), 0);
    }

    #[test]
    fn merge_appends_after_existing_records() {
        let mut left = DialogueGrouping::new();
        left.append("Lares", "Gothic", vec![record("l1")]);
        let mut right = DialogueGrouping::new();
        right.append("Lares", "Gothic", vec![record("r1")]);
        right.append("Lares", "NotR", vec![record("r2")]);
        right.append("Vatras", "NotR", vec![record("v1")]);

        left.merge(right);
        assert_eq!(tags(left.records("Lares", "Gothic").unwrap()), vec!["l1", "r1"]);
        assert_eq!(tags(left.records("Lares", "NotR").unwrap()), vec!["r2"]);
        assert_eq!(left.characters().count(), 2);
    }
}
