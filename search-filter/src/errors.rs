use crate::operator::Operator;
use crate::value::ValueKind;

/// Error types for building and loading filters
#[derive(Debug)]
pub enum FilterError {
    // Comparison operator applied to a non-numeric value
    InvalidOperator {
        operator: Operator,
        kind: ValueKind,
    },
    UnknownOperator(String),
    InvalidClause(String),
    IoError(std::io::Error),
    YamlError(serde_yaml_ng::Error),
    JsonError(serde_json::Error),
}

impl FilterError {
    pub fn for_operator(operator: Operator, kind: ValueKind) -> Self {
        FilterError::InvalidOperator { operator, kind }
    }
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::IoError(err)
    }
}

impl From<serde_yaml_ng::Error> for FilterError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        FilterError::YamlError(err)
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::JsonError(err)
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::InvalidOperator { operator, kind } => {
                write!(f, "Invalid operator: {} for type {}", operator, kind)
            }
            FilterError::UnknownOperator(op) => write!(f, "Unknown operator: {}", op),
            FilterError::InvalidClause(clause) => write!(
                f,
                "Expected format: `attribute op value` (with optional spaces around the op), found {}",
                clause
            ),
            FilterError::IoError(err) => write!(f, "IO error: {}", err),
            FilterError::YamlError(err) => write!(f, "YAML error: {}", err),
            FilterError::JsonError(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::IoError(e) => Some(e),
            FilterError::YamlError(e) => Some(e),
            FilterError::JsonError(e) => Some(e),
            FilterError::InvalidOperator { .. }
            | FilterError::UnknownOperator(_)
            | FilterError::InvalidClause(_) => None,
        }
    }
}
