//! Identity index: every truth record reachable under each of its
//! derivable identity keys.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::filename::strip_uuid_suffix;
use crate::model::TruthRecord;
use crate::normalize::normalize_key;

/// Envelope key of the object-shaped truth collection.
const TEST_DATA_KEY: &str = "testData";

/// Item field carrying the pipeline-assigned file name.
const NEW_FILE_NAME_FIELD: &str = "NEW_FILE_NAME";
/// Item field carrying the document display name.
const NAME_FIELD: &str = "NAME";
/// Item field carrying the metadata payload (JSON string or object).
const METADATA_FIELD: &str = "METADATA";

/// Lookup from identity key to truth record. Built once per invocation,
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    records: Vec<TruthRecord>,
    by_file_name: HashMap<String, usize>,
    by_provider_name: HashMap<String, usize>,
    stats: IndexStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub items_seen: usize,
    pub records_indexed: usize,
    /// Items skipped outright: non-object items and metadata payloads that
    /// do not decode to a mapping.
    pub skipped_malformed: usize,
    /// Items with no derivable identity key.
    pub dropped_no_identity: usize,
    /// Identity keys that pointed at one record and were overwritten by a
    /// later one (last write wins).
    pub key_collisions: usize,
}

impl IdentityIndex {
    /// Build the index from a truth collection of either tolerated shape:
    /// `{ "testData": [...] }` or a bare array. Any other shape yields an
    /// empty index.
    pub fn build(truth: &Value) -> Self {
        let items: &[Value] = match truth {
            Value::Object(map) => map
                .get(TEST_DATA_KEY)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            Value::Array(items) => items.as_slice(),
            _ => &[],
        };

        let mut index = Self::default();
        for item in items {
            index.ingest(item);
        }
        index
    }

    /// Record reachable under a file-name identity key, raw or
    /// canonicalized at insert time.
    pub fn lookup_file_name(&self, key: &str) -> Option<&TruthRecord> {
        self.by_file_name.get(key).map(|&i| &self.records[i])
    }

    /// Record reachable by provider name; folding happens here so callers
    /// pass the raw name.
    pub fn lookup_provider_name(&self, name: &str) -> Option<&TruthRecord> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        self.by_provider_name.get(&key).map(|&i| &self.records[i])
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ingest(&mut self, item: &Value) {
        self.stats.items_seen += 1;

        let Some(fields) = item.as_object() else {
            self.stats.skipped_malformed += 1;
            return;
        };
        let Some(meta_data) = decode_meta_data(fields.get(METADATA_FIELD)) else {
            self.stats.skipped_malformed += 1;
            return;
        };

        let original_file_name =
            string_field(&meta_data, "fileName").or_else(|| string_field(&meta_data, "filename"));
        let new_file_name = string_field(fields, NEW_FILE_NAME_FIELD)
            .or_else(|| string_field(&meta_data, "newFileName"));
        let provider_name = string_field(&meta_data, "providerName");

        if original_file_name.is_none() && new_file_name.is_none() && provider_name.is_none() {
            self.stats.dropped_no_identity += 1;
            return;
        }

        let content_type = fields
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .map(str::to_string);
        let file_name = original_file_name
            .clone()
            .or_else(|| new_file_name.clone())
            .unwrap_or_default();

        let idx = self.records.len();
        self.records.push(TruthRecord::new(
            file_name,
            content_type,
            provider_name.clone(),
            meta_data,
        ));
        self.stats.records_indexed += 1;

        if let Some(name) = &new_file_name {
            self.insert_file_key(name.clone(), idx);
            self.insert_file_key(strip_uuid_suffix(name), idx);
        }
        if let Some(name) = &original_file_name {
            self.insert_file_key(name.clone(), idx);
            self.insert_file_key(strip_uuid_suffix(name), idx);
        }
        if let Some(name) = &provider_name {
            self.insert_provider_key(normalize_key(name), idx);
        }
    }

    fn insert_file_key(&mut self, key: String, idx: usize) {
        if key.is_empty() {
            return;
        }
        if let Some(prev) = self.by_file_name.insert(key, idx) {
            if prev != idx {
                self.stats.key_collisions += 1;
            }
        }
    }

    fn insert_provider_key(&mut self, key: String, idx: usize) {
        if key.is_empty() {
            return;
        }
        if let Some(prev) = self.by_provider_name.insert(key, idx) {
            if prev != idx {
                self.stats.key_collisions += 1;
            }
        }
    }
}

/// Metadata arrives either pre-decoded or as a JSON-encoded string; both
/// shapes normalize to one mapping here. Absent and null mean "no
/// metadata". A payload that does not decode to a mapping is malformed and
/// returns `None`, skipping the item.
fn decode_meta_data(field: Option<&Value>) -> Option<Map<String, Value>> {
    match field {
        None | Some(Value::Null) => Some(Map::new()),
        Some(Value::Object(map)) => Some(map.clone()),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        Some(_) => None,
    }
}

/// Non-empty string value of a mapping field.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UUID_NAME: &str = "report-123e4567-e89b-12d3-a456-426614174000.pdf";

    fn item(new_file_name: &str, metadata: Value) -> Value {
        json!({"NEW_FILE_NAME": new_file_name, "METADATA": metadata})
    }

    #[test]
    fn accepts_envelope_and_bare_array() {
        let items = json!([item("doc.pdf", json!({"providerName": "Dr. Smith"}))]);
        let envelope = json!({ "testData": items });

        let from_bare = IdentityIndex::build(&items);
        let from_envelope = IdentityIndex::build(&envelope);
        assert_eq!(from_bare.len(), 1);
        assert_eq!(from_envelope.len(), 1);
        assert!(from_bare.lookup_file_name("doc.pdf").is_some());
        assert!(from_envelope.lookup_file_name("doc.pdf").is_some());
    }

    #[test]
    fn unrecognized_shape_yields_empty_index() {
        for bad in [json!("nope"), json!(42), json!({"otherKey": []})] {
            let index = IdentityIndex::build(&bad);
            assert!(index.is_empty());
            assert_eq!(index.stats().items_seen, 0);
        }
    }

    #[test]
    fn metadata_string_and_object_are_equivalent() {
        let as_object = item("doc.pdf", json!({"fileName": "orig.pdf", "state": "TX"}));
        let as_string = item(
            "doc.pdf",
            json!(r#"{"fileName": "orig.pdf", "state": "TX"}"#),
        );

        for truth in [json!([as_object]), json!([as_string])] {
            let index = IdentityIndex::build(&truth);
            assert_eq!(index.len(), 1);
            let rec = index.lookup_file_name("orig.pdf").unwrap();
            assert_eq!(rec.file_name, "orig.pdf");
            assert_eq!(rec.doc["metaData"]["state"], "TX");
        }
    }

    #[test]
    fn undecodable_metadata_skips_item_not_batch() {
        let truth = json!([
            item("bad.pdf", json!("{not json")),
            item("good.pdf", json!({})),
        ]);
        let index = IdentityIndex::build(&truth);
        assert_eq!(index.len(), 1);
        assert!(index.lookup_file_name("bad.pdf").is_none());
        assert!(index.lookup_file_name("good.pdf").is_some());
        assert_eq!(index.stats().skipped_malformed, 1);
    }

    #[test]
    fn non_mapping_metadata_is_malformed() {
        // Decodes fine, but to a scalar — still a skip.
        let truth = json!([item("bad.pdf", json!("42"))]);
        let index = IdentityIndex::build(&truth);
        assert!(index.is_empty());
        assert_eq!(index.stats().skipped_malformed, 1);
    }

    #[test]
    fn item_without_identity_is_dropped() {
        let truth = json!([json!({"METADATA": {"issueDate": 1700000000}})]);
        let index = IdentityIndex::build(&truth);
        assert!(index.is_empty());
        assert_eq!(index.stats().dropped_no_identity, 1);
    }

    #[test]
    fn absent_metadata_still_indexes_by_new_file_name() {
        let truth = json!([json!({"NEW_FILE_NAME": "doc.pdf"})]);
        let index = IdentityIndex::build(&truth);
        assert_eq!(index.len(), 1);
        assert!(index.lookup_file_name("doc.pdf").is_some());
    }

    #[test]
    fn record_reachable_by_raw_and_canonical_names() {
        let truth = json!([item(UUID_NAME, json!({}))]);
        let index = IdentityIndex::build(&truth);
        assert!(index.lookup_file_name(UUID_NAME).is_some());
        assert!(index.lookup_file_name("report.pdf").is_some());
    }

    #[test]
    fn lowercase_filename_key_is_a_fallback() {
        let truth = json!([item("doc.pdf", json!({"filename": "orig.pdf"}))]);
        let index = IdentityIndex::build(&truth);
        let rec = index.lookup_file_name("orig.pdf").unwrap();
        assert_eq!(rec.file_name, "orig.pdf");
    }

    #[test]
    fn provider_side_table_folds_case_and_whitespace() {
        let truth = json!([json!({"METADATA": {"providerName": "Jane Doe"}})]);
        let index = IdentityIndex::build(&truth);
        assert!(index.lookup_provider_name(" jane doe ").is_some());
        assert!(index.lookup_provider_name("JANE DOE").is_some());
        assert!(index.lookup_provider_name("john doe").is_none());
        assert!(index.lookup_provider_name("").is_none());
    }

    #[test]
    fn colliding_keys_keep_the_later_record() {
        let truth = json!([
            item("doc.pdf", json!({"state": "TX"})),
            item("doc.pdf", json!({"state": "OK"})),
        ]);
        let index = IdentityIndex::build(&truth);
        let rec = index.lookup_file_name("doc.pdf").unwrap();
        assert_eq!(rec.doc["metaData"]["state"], "OK");
        assert_eq!(index.stats().key_collisions, 1);
        assert_eq!(index.stats().records_indexed, 2);
    }
}
