use crate::errors::FilterError;
use crate::value::{Term, ValueKind};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    Lt,  // attr < n
    Lte, // attr <= n
    #[default]
    Eq, // attr:value or attr = n
    Neq, // NOT attr:value or attr != n
    Gte, // attr >= n
    Gt,  // attr > n
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Gte => ">=",
            Operator::Gt => ">",
        }
    }

    /// Ordering operators, only meaningful against numbers
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::Lte | Operator::Gte | Operator::Gt
        )
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "<" | "lt" => Ok(Operator::Lt),
            "<=" | "lte" | "le" => Ok(Operator::Lte),
            "=" | "==" | "eq" => Ok(Operator::Eq),
            "!=" | "<>" | "ne" | "neq" => Ok(Operator::Neq),
            ">=" | "gte" | "ge" => Ok(Operator::Gte),
            ">" | "gt" => Ok(Operator::Gt),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = FilterError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejects comparison operators on anything but a number.
/// Must run on the normalized term, so numeric text passes.
pub fn validate(operator: Operator, term: &Term) -> Result<(), FilterError> {
    let kind = term.kind();
    if operator.is_comparison() && kind != ValueKind::Number {
        return Err(FilterError::for_operator(operator, kind));
    }
    Ok(())
}
