//! Batch orchestration: scan collections, resolve identities, aggregate, render.
//!
//! Phases run strictly in sequence. Every collection is loaded before any name
//! is resolved, and the grouping is complete before the first workbook is
//! written.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::{ExtractorConfig, OverrideTable};
use crate::data::SourceFile;
use crate::errors::DialogueError;
use crate::extract::extract_records;
use crate::grouping::DialogueGrouping;
use crate::identity::IdentityResolver;
use crate::report::ReportRenderer;
use crate::source::{DialogueSource, DirectorySource};
use crate::types::{CharacterName, CollectionName, FileKey};

type DynSource = Box<dyn DialogueSource + 'static>;

/// Files of one collection, in encounter order.
#[derive(Clone, Debug)]
pub struct ScannedCollection {
    /// Sheet name source.
    pub collection: CollectionName,
    /// Decoded files, in listing order.
    pub files: Vec<SourceFile>,
}

/// Counts and artifacts of a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RunSummary {
    pub collections: usize,
    pub files: usize,
    pub characters: usize,
    pub records: usize,
    pub written: Vec<PathBuf>,
}

/// Owns the collection sources and the identity resolver for one run.
pub struct DialoguePipeline {
    sources: Vec<DynSource>,
    resolver: IdentityResolver,
}

impl DialoguePipeline {
    /// Create a pipeline with no sources.
    pub fn new(resolver: IdentityResolver) -> Self {
        Self {
            sources: Vec::new(),
            resolver,
        }
    }

    /// Build a pipeline from a run configuration: overrides plus one directory
    /// source per input directory, in configured order.
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, DialogueError> {
        config.validate()?;
        let overrides = OverrideTable::load(&config.override_file)?;
        let mut pipeline = Self::new(IdentityResolver::new(overrides));
        for dir in &config.input_dirs {
            pipeline = pipeline.with_source(DirectorySource::new(dir));
        }
        Ok(pipeline)
    }

    /// Register a collection. Collections are processed in registration order.
    pub fn with_source(mut self, source: impl DialogueSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of registered collections.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Load every collection.
    pub fn scan(&self) -> Result<Vec<ScannedCollection>, DialogueError> {
        self.sources
            .iter()
            .map(|source| -> Result<ScannedCollection, DialogueError> {
                Ok(ScannedCollection {
                    collection: source.collection().to_string(),
                    files: source.load()?,
                })
            })
            .collect()
    }

    /// Resolve one character name per distinct file key across all collections.
    pub fn resolve(&self, scanned: &[ScannedCollection]) -> IndexMap<FileKey, CharacterName> {
        self.resolver
            .resolve_all(scanned.iter().flat_map(|collection| collection.files.iter()))
    }

    /// Scan, resolve, and aggregate without rendering.
    pub fn build_grouping(&self) -> Result<DialogueGrouping, DialogueError> {
        self.scan_and_aggregate().map(|(_, grouping)| grouping)
    }

    fn scan_and_aggregate(
        &self,
    ) -> Result<(Vec<ScannedCollection>, DialogueGrouping), DialogueError> {
        let scanned = self.scan()?;
        let identities = self.resolve(&scanned);
        let grouping = aggregate(&scanned, &identities);
        Ok((scanned, grouping))
    }

    /// Full run: aggregate every collection, then write one workbook per character.
    pub fn run(&self, renderer: &ReportRenderer) -> Result<RunSummary, DialogueError> {
        let (scanned, grouping) = self.scan_and_aggregate()?;
        info!(
            collections = scanned.len(),
            characters = grouping.character_count(),
            records = grouping.record_count(),
            "aggregation complete"
        );
        let written = renderer.render_all(&grouping)?;
        Ok(RunSummary {
            collections: scanned.len(),
            files: scanned.iter().map(|collection| collection.files.len()).sum(),
            characters: grouping.character_count(),
            records: grouping.record_count(),
            written,
        })
    }
}

/// Fold scanned collections into a grouping.
///
/// Each collection contributes one batch, merged in collection order; within a
/// batch, files contribute in their listed order.
pub fn aggregate(
    scanned: &[ScannedCollection],
    identities: &IndexMap<FileKey, CharacterName>,
) -> DialogueGrouping {
    let mut grouping = DialogueGrouping::new();
    for collection in scanned {
        grouping.merge(collection_batch(collection, identities));
    }
    grouping
}

fn collection_batch(
    collection: &ScannedCollection,
    identities: &IndexMap<FileKey, CharacterName>,
) -> DialogueGrouping {
    let mut batch = DialogueGrouping::new();
    for file in &collection.files {
        let Some(character) = identities.get(&file.key) else {
            continue;
        };
        let records = extract_records(&file.text);
        debug!(
            collection = %collection.collection,
            file = %file.file_name,
            character = %character,
            records = records.len(),
            "extracted dialogue"
        );
        batch.append(character, &collection.collection, records);
    }
    batch
}
