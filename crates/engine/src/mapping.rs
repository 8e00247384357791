//! Field mapping: which extract columns are compared against which truth
//! paths. Fixed at configuration time, never derived from data.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CompareError;
use crate::path::Selector;

/// One output field: the extract column it reads and the path into the
/// truth record it compares against. Several columns may share one path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldRule {
    pub column: String,
    pub path: Vec<Selector>,
}

/// Ordered field mapping driving the comparison. Declaration order is the
/// output column order.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    pub name: String,
    pub fields: Vec<FieldRule>,
}

impl FieldMapping {
    /// Parse and validate a mapping from TOML. Path elements are either a
    /// key string or an array of alias keys:
    ///
    /// ```toml
    /// name = "custom"
    ///
    /// [[fields]]
    /// column = "Sub-Category"
    /// path = ["metaData", ["subCategory", "subcategory"]]
    /// ```
    pub fn from_toml(input: &str) -> Result<Self, CompareError> {
        let mapping: FieldMapping =
            toml::from_str(input).map_err(|e| CompareError::MappingParse(e.to_string()))?;
        mapping.validate()?;
        Ok(mapping)
    }

    pub fn validate(&self) -> Result<(), CompareError> {
        if self.fields.is_empty() {
            return Err(CompareError::MappingValidation(
                "at least one field is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.fields {
            if rule.column.is_empty() {
                return Err(CompareError::MappingValidation(
                    "field with empty column name".into(),
                ));
            }
            if !seen.insert(rule.column.as_str()) {
                return Err(CompareError::MappingValidation(format!(
                    "duplicate column '{}'",
                    rule.column
                )));
            }
            if rule.path.is_empty() {
                return Err(CompareError::MappingValidation(format!(
                    "column '{}': empty path",
                    rule.column
                )));
            }
            if rule.path.iter().any(Selector::is_empty) {
                return Err(CompareError::MappingValidation(format!(
                    "column '{}': empty selector in path",
                    rule.column
                )));
            }
        }

        Ok(())
    }

    /// Built-in mapping for the credentialing extract. The five
    /// sub-category columns deliberately share one metadata path.
    pub fn credentialing() -> Self {
        Self {
            name: "credentialing".into(),
            fields: vec![
                field("Content Type", &["contentType"]),
                field("Document Type", &["contentType"]),
                field("Name", &["metaData", "providerName"]),
                field("Issuing Entity", &["metaData", "issuingAuthority"]),
                field("Issued Date", &["metaData", "issueDate"]),
                field("Expiration Date", &["metaData", "expirationDate"]),
                field("State", &["metaData", "state"]),
                field("result_id", &["metaData", "resultsDate"]),
                field("Education and Training Sub-Category", &["metaData", "subCategory"]),
                field(
                    "Life Support and Misc. Certifications Sub-Category",
                    &["metaData", "subCategory"],
                ),
                field("Board Certification Sub-Category", &["metaData", "subCategory"]),
                field("DEA Registration Sub-Category", &["metaData", "subCategory"]),
                field("Military Service Sub-Category", &["metaData", "subCategory"]),
            ],
        }
    }
}

fn field(column: &str, path: &[&str]) -> FieldRule {
    FieldRule {
        column: column.into(),
        path: path.iter().map(|k| Selector::key(*k)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "custom"

[[fields]]
column = "Content Type"
path = ["contentType"]

[[fields]]
column = "Sub-Category"
path = ["metaData", ["subCategory", "subcategory"]]
"#;

    #[test]
    fn parse_valid_mapping() {
        let mapping = FieldMapping::from_toml(VALID).unwrap();
        assert_eq!(mapping.name, "custom");
        assert_eq!(mapping.fields.len(), 2);
        assert_eq!(mapping.fields[0].path, vec![Selector::key("contentType")]);
        assert_eq!(
            mapping.fields[1].path[1],
            Selector::aliases(["subCategory", "subcategory"])
        );
    }

    #[test]
    fn reject_duplicate_column() {
        let input = r#"
name = "bad"

[[fields]]
column = "State"
path = ["metaData", "state"]

[[fields]]
column = "State"
path = ["metaData", "state"]
"#;
        let err = FieldMapping::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("duplicate column 'State'"));
    }

    #[test]
    fn reject_empty_path() {
        let input = r#"
name = "bad"

[[fields]]
column = "State"
path = []
"#;
        let err = FieldMapping::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("empty path"));
    }

    #[test]
    fn reject_empty_alias_list() {
        let input = r#"
name = "bad"

[[fields]]
column = "State"
path = ["metaData", []]
"#;
        let err = FieldMapping::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("empty selector"));
    }

    #[test]
    fn reject_no_fields() {
        let err = FieldMapping::from_toml("name = \"empty\"\nfields = []").unwrap_err();
        assert!(err.to_string().contains("at least one field"));
    }

    #[test]
    fn shared_paths_are_many_to_one() {
        let mapping = FieldMapping::credentialing();
        let sub: Vec<_> = mapping
            .fields
            .iter()
            .filter(|f| f.path == vec![Selector::key("metaData"), Selector::key("subCategory")])
            .collect();
        assert_eq!(sub.len(), 5);
    }

    #[test]
    fn credentialing_order_is_declaration_order() {
        let mapping = FieldMapping::credentialing();
        assert_eq!(mapping.fields.len(), 13);
        assert_eq!(mapping.fields[0].column, "Content Type");
        assert_eq!(mapping.fields[2].column, "Name");
        assert_eq!(mapping.fields[12].column, "Military Service Sub-Category");
        assert!(mapping.validate().is_ok());
    }
}
