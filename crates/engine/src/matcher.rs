//! Pairing of extract rows with truth records.

use serde::Serialize;

use crate::filename::strip_uuid_suffix;
use crate::index::IdentityIndex;
use crate::model::{ExtractRow, TruthRecord};

/// How a row found its truth record. Strategies are tried in this order;
/// the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    ExactFileName,
    CanonicalFileName,
    ProviderName,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactFileName => write!(f, "exact_file_name"),
            Self::CanonicalFileName => write!(f, "canonical_file_name"),
            Self::ProviderName => write!(f, "provider_name"),
        }
    }
}

/// Resolve the truth record for one extract row, or `None` when every
/// strategy misses — an unmatched row is a normal outcome, not an error.
pub fn resolve_truth<'a>(
    index: &'a IdentityIndex,
    row: &ExtractRow,
) -> Option<(MatchStrategy, &'a TruthRecord)> {
    let assets = row.asset_name();
    if let Some(rec) = index.lookup_file_name(assets) {
        return Some((MatchStrategy::ExactFileName, rec));
    }
    if let Some(rec) = index.lookup_file_name(&strip_uuid_suffix(assets)) {
        return Some((MatchStrategy::CanonicalFileName, rec));
    }
    index
        .lookup_provider_name(row.provider_name())
        .map(|rec| (MatchStrategy::ProviderName, rec))
}
