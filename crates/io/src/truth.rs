// Truth collection loading

use std::path::Path;

use serde_json::Value;

/// Load the truth collection from a file. The file must be JSON; shape
/// tolerance below that level (envelope vs bare array) belongs to the
/// engine's index builder.
pub fn read_truth_file(path: &Path) -> Result<Value, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse_truth(&data)
}

pub fn parse_truth(data: &str) -> Result<Value, String> {
    serde_json::from_str(data).map_err(|e| format!("truth JSON parse error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_envelope_collection() {
        let value = parse_truth(r#"{"testData": [{"NEW_FILE_NAME": "doc.pdf"}]}"#).unwrap();
        assert!(value["testData"].is_array());
    }

    #[test]
    fn rejects_non_json() {
        let err = parse_truth("{not json").unwrap_err();
        assert!(err.contains("truth JSON parse error"));
    }
}
