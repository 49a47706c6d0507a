//! Declarative filter descriptions
//!
//! A filter document lists clauses that are replayed, in order, onto a
//! [`QueryBuilder`]. Documents are YAML or JSON:
//!
//! ```yaml
//! conditions:
//!   - kind: where
//!     attribute: price
//!     operator: "<"
//!     value: 100
//!   - kind: where_in
//!     attribute: color
//!     values: [red, "dark blue"]
//! ```
//!
//! Single clauses can also be written inline as `attribute OP value`.

use crate::builder::QueryBuilder;
use crate::errors::FilterError;
use crate::operator::Operator;
use crate::value::Value;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\w\.\-]+)\s*(<=|>=|!=|==|<>|<|>|=)\s*(.*)$").expect("valid clause regex")
});

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Clause {
    Where {
        attribute: String,
        #[serde(default)]
        operator: Operator,
        #[serde(default)]
        value: Value,
    },
    WhereNot {
        attribute: String,
        #[serde(default)]
        value: Value,
    },
    WhereIn {
        attribute: String,
        values: Vec<Value>,
    },
    WhereNotIn {
        attribute: String,
        values: Vec<Value>,
    },
}

impl Clause {
    pub fn apply(&self, builder: &mut QueryBuilder) -> Result<(), FilterError> {
        match self {
            Clause::Where {
                attribute,
                operator,
                value,
            } => {
                builder.where_op(attribute, *operator, value.clone())?;
            }
            Clause::WhereNot { attribute, value } => {
                builder.where_not(attribute, value.clone());
            }
            Clause::WhereIn { attribute, values } => {
                builder.where_in(attribute, values.iter().cloned());
            }
            Clause::WhereNotIn { attribute, values } => {
                builder.where_not_in(attribute, values.iter().cloned());
            }
        }
        Ok(())
    }
}

impl FromStr for Clause {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = CLAUSE_RE
            .captures(s)
            .ok_or_else(|| FilterError::InvalidClause(s.to_string()))?;

        let attribute = captures[1].to_string();
        let operator = Operator::from_str(&captures[2])?;
        let raw = captures[3].trim();

        let value = match raw {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::Text(unquote(raw).to_string()),
        };
        Ok(Clause::Where {
            attribute,
            operator,
            value,
        })
    }
}

// Strips one pair of matching surrounding quotes
fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterDocument {
    #[serde(default)]
    pub conditions: Vec<Clause>,
}

impl FilterDocument {
    pub fn from_yaml(yaml: &str) -> Result<Self, FilterError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a document from disk; `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let contents = fs_err::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let document = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        info!(
            "Loaded {} filter conditions from {}",
            document.conditions.len(),
            path.display()
        );
        Ok(document)
    }

    pub fn apply(&self, builder: &mut QueryBuilder) -> Result<(), FilterError> {
        for clause in &self.conditions {
            debug!("Applying {:?}", clause);
            clause.apply(builder)?;
        }
        Ok(())
    }

    pub fn to_filter(&self) -> Result<String, FilterError> {
        let mut builder = QueryBuilder::new();
        self.apply(&mut builder)?;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clause() {
        let clause = Clause::from_str("price < 100").unwrap();
        assert_eq!(
            clause,
            Clause::Where {
                attribute: "price".to_string(),
                operator: Operator::Lt,
                value: Value::Text("100".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_clause_without_spaces() {
        let clause = Clause::from_str("gpu.memory>=16").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { ref attribute, operator: Operator::Gte, .. } if attribute == "gpu.memory"
        ));
    }

    #[test]
    fn test_parse_clause_values() {
        let clause = Clause::from_str("city = \"New York\"").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { value: Value::Text(ref v), .. } if v == "New York"
        ));

        let clause = Clause::from_str("active != true").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { operator: Operator::Neq, value: Value::Boolean(true), .. }
        ));

        let clause = Clause::from_str("flag = 'false'").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { value: Value::Text(ref v), .. } if v == "false"
        ));
    }

    #[test]
    fn test_parse_clause_unmatched_quotes() {
        let clause = Clause::from_str("city = \"New York").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { value: Value::Text(ref v), .. } if v == "\"New York"
        ));

        let clause = Clause::from_str("name = 'lorem\"").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { value: Value::Text(ref v), .. } if v == "'lorem\""
        ));

        let clause = Clause::from_str("name = \"").unwrap();
        assert!(matches!(
            clause,
            Clause::Where { value: Value::Text(ref v), .. } if v == "\""
        ));
    }

    #[test]
    fn test_parse_clause_invalid() {
        assert!(matches!(
            Clause::from_str("just words"),
            Err(FilterError::InvalidClause(_))
        ));
        assert!(matches!(
            Clause::from_str(""),
            Err(FilterError::InvalidClause(_))
        ));
    }

    #[test]
    fn test_apply_clauses() {
        let mut builder = QueryBuilder::new();
        for clause in ["brand = acme", "price <= 99.5", "tag != sale"] {
            Clause::from_str(clause).unwrap().apply(&mut builder).unwrap();
        }
        assert_eq!(builder.build(), "brand:acme AND price <= 99.5 AND NOT tag:sale");
    }

    #[test]
    fn test_apply_rejects_comparison_on_text() {
        let mut builder = QueryBuilder::new();
        let clause = Clause::from_str("brand > acme").unwrap();
        assert!(matches!(
            clause.apply(&mut builder),
            Err(FilterError::InvalidOperator { operator: Operator::Gt, .. })
        ));
        assert!(builder.is_empty());
    }
}
