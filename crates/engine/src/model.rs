use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::index::IndexStats;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Column holding the file name the extract pipeline assigned to a document.
/// Primary identity for matching against the truth collection.
pub const ASSETS_COLUMN: &str = "Assets";

/// Column holding the provider display name, the last-resort identity when
/// no file-name strategy matches.
pub const NAME_COLUMN: &str = "Name";

/// One row of the extract table: column header → raw cell value.
/// The table is ingested as all-string; absent columns read as empty.
#[derive(Debug, Clone, Default)]
pub struct ExtractRow {
    pub fields: HashMap<String, String>,
}

impl ExtractRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Cell value for a column, empty string if the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn asset_name(&self) -> &str {
        self.get(ASSETS_COLUMN)
    }

    pub fn provider_name(&self) -> &str {
        self.get(NAME_COLUMN)
    }
}

impl From<HashMap<String, String>> for ExtractRow {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}

// ---------------------------------------------------------------------------
// Truth record
// ---------------------------------------------------------------------------

/// One preprocessed entry of the truth collection.
///
/// `doc` is the resolution root that field paths walk: `fileName`,
/// `contentType` and the nested `metaData` mapping, in the shape the raw
/// collection carries them.
#[derive(Debug, Clone)]
pub struct TruthRecord {
    pub file_name: String,
    pub content_type: Option<String>,
    pub provider_name: Option<String>,
    pub doc: Value,
}

impl TruthRecord {
    pub fn new(
        file_name: String,
        content_type: Option<String>,
        provider_name: Option<String>,
        meta_data: Map<String, Value>,
    ) -> Self {
        let mut doc = Map::new();
        doc.insert("fileName".into(), Value::String(file_name.clone()));
        if let Some(ct) = &content_type {
            doc.insert("contentType".into(), Value::String(ct.clone()));
        }
        doc.insert("metaData".into(), Value::Object(meta_data));

        Self {
            file_name,
            content_type,
            provider_name,
            doc: Value::Object(doc),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Per-field comparison outcome. `NoOpinion` means neither side had data,
/// so no assertion is made either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Match,
    Mismatch,
    NoOpinion,
}

impl Verdict {
    /// Cell rendering consumed by downstream export: `True`, `False`, or
    /// blank for no opinion.
    pub fn as_cell(&self) -> &'static str {
        match self {
            Self::Match => "True",
            Self::Mismatch => "False",
            Self::NoOpinion => "",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::NoOpinion => write!(f, "no_opinion"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Row-oriented output table.
///
/// `headers` carries the full ordered column sequence, spacer columns
/// included; every row is a parallel vector of cell strings. Rows are never
/// mutated after emission.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Summary + Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompareSummary {
    pub rows: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub matched_by_exact_name: usize,
    pub matched_by_canonical_name: usize,
    pub matched_by_provider_name: usize,
    pub fields_compared: usize,
    pub field_matches: usize,
    pub field_mismatches: usize,
    pub field_no_opinion: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareMeta {
    pub mapping_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    pub meta: CompareMeta,
    pub summary: CompareSummary,
    pub index: IndexStats,
    pub table: ComparisonTable,
}
