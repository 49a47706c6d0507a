//! Common test utilities and shared test data for the search-filter crate

#![allow(dead_code)]

use search_filter::QueryBuilder;
use std::io::Write;
use tempfile::NamedTempFile;

/// Sample YAML document covering every clause kind
pub const SAMPLE_YAML: &str = r#"
conditions:
  - kind: where
    attribute: brand
    value: acme
  - kind: where
    attribute: price
    operator: "<"
    value: 100
  - kind: where_not
    attribute: status
    value: sold out
  - kind: where_in
    attribute: color
    values: [red, "dark blue"]
  - kind: where_not_in
    attribute: size
    values: [1, 2]
"#;

pub const SAMPLE_FILTER: &str =
    r#"brand:acme AND price < 100 AND NOT status:"sold out" AND (color:red OR color:"dark blue") AND (size != 1 AND size != 2)"#;

/// Same conditions as `SAMPLE_YAML`, as JSON
pub const SAMPLE_JSON: &str = r#"{
  "conditions": [
    {"kind": "where", "attribute": "brand", "value": "acme"},
    {"kind": "where", "attribute": "price", "operator": "<", "value": 100},
    {"kind": "where_not", "attribute": "status", "value": "sold out"},
    {"kind": "where_in", "attribute": "color", "values": ["red", "dark blue"]},
    {"kind": "where_not_in", "attribute": "size", "values": [1, 2]}
  ]
}"#;

pub fn builder() -> QueryBuilder {
    QueryBuilder::new()
}

/// Write `contents` to a temporary file with the given extension
pub fn write_temp_document(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}
