//! Comparison assembly: one output row per extract row, one column trio
//! plus spacer per mapped field.

use serde_json::Value;

use crate::index::IdentityIndex;
use crate::mapping::FieldMapping;
use crate::matcher::{self, MatchStrategy};
use crate::model::{
    CompareMeta, CompareResult, CompareSummary, ComparisonTable, ExtractRow, Verdict,
};
use crate::normalize::{normalize_text, normalize_value, verdict};
use crate::path;

/// Leading output column, carrying the row's raw asset name.
pub const FILE_NAME_COLUMN: &str = "File Name";

/// Spacer column header repeated after every field group. Renders blank in
/// a spreadsheet.
pub const SPACER_COLUMN: &str = "  ";

/// Index a truth collection. Infallible under every tolerated input shape;
/// an unrecognized shape simply yields an empty index.
pub fn build_identity_index(truth: &Value) -> IdentityIndex {
    IdentityIndex::build(truth)
}

/// One-call entry point: index the truth collection, then compare every
/// extract row against it.
pub fn reconcile(rows: &[ExtractRow], truth: &Value, mapping: &FieldMapping) -> CompareResult {
    build_comparison(rows, &IdentityIndex::build(truth), mapping)
}

/// Compare extract rows against an already-built index. Row order follows
/// the input; column order follows the mapping's declaration order.
pub fn build_comparison(
    rows: &[ExtractRow],
    index: &IdentityIndex,
    mapping: &FieldMapping,
) -> CompareResult {
    let mut summary = CompareSummary::default();
    let mut table_rows = Vec::with_capacity(rows.len());

    for row in rows {
        let resolved = matcher::resolve_truth(index, row);
        match resolved {
            Some((strategy, _)) => {
                summary.matched_rows += 1;
                match strategy {
                    MatchStrategy::ExactFileName => summary.matched_by_exact_name += 1,
                    MatchStrategy::CanonicalFileName => summary.matched_by_canonical_name += 1,
                    MatchStrategy::ProviderName => summary.matched_by_provider_name += 1,
                }
            }
            None => summary.unmatched_rows += 1,
        }
        let truth_rec = resolved.map(|(_, rec)| rec);

        let mut cells = Vec::with_capacity(1 + mapping.fields.len() * 4);
        cells.push(row.asset_name().to_string());

        for rule in &mapping.fields {
            let truth_norm =
                normalize_value(truth_rec.and_then(|rec| path::resolve(&rec.doc, &rule.path)));
            let extract_norm = normalize_text(row.get(&rule.column));
            let field_verdict = verdict(&truth_norm, &extract_norm);

            summary.fields_compared += 1;
            match field_verdict {
                Verdict::Match => summary.field_matches += 1,
                Verdict::Mismatch => summary.field_mismatches += 1,
                Verdict::NoOpinion => summary.field_no_opinion += 1,
            }

            cells.push(truth_norm);
            cells.push(extract_norm);
            cells.push(field_verdict.as_cell().to_string());
            cells.push(String::new());
        }

        table_rows.push(cells);
    }

    summary.rows = rows.len();

    CompareResult {
        meta: CompareMeta {
            mapping_name: mapping.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        index: index.stats().clone(),
        table: ComparisonTable {
            headers: headers(mapping),
            rows: table_rows,
        },
    }
}

/// The exact output column sequence: `File Name`, then per mapped field
/// `Truth: X`, `Extract: X`, `X Match?`, spacer. Downstream export consumes
/// this ordering bit-for-bit.
pub fn headers(mapping: &FieldMapping) -> Vec<String> {
    let mut headers = Vec::with_capacity(1 + mapping.fields.len() * 4);
    headers.push(FILE_NAME_COLUMN.to_string());
    for rule in &mapping.fields {
        headers.push(format!("Truth: {}", rule.column));
        headers.push(format!("Extract: {}", rule.column));
        headers.push(format!("{} Match?", rule.column));
        headers.push(SPACER_COLUMN.to_string());
    }
    headers
}
