//! Rendering of a single `attribute OP value` condition

use crate::errors::FilterError;
use crate::operator::{validate, Operator};
use crate::value::{normalize, Term, Value};
use log::debug;

/// Renders one condition into its filter fragment.
///
/// Returns `Ok(None)` when the condition has to be left out: empty
/// attribute, or a value that normalizes to nothing.
pub fn build_statement(
    attribute: &str,
    operator: Operator,
    value: Value,
) -> Result<Option<String>, FilterError> {
    if attribute.is_empty() {
        debug!("Skipping condition with empty attribute");
        return Ok(None);
    }

    let term = match normalize(value) {
        Some(term) => term,
        None => {
            debug!("Skipping condition on {}: no value", attribute);
            return Ok(None);
        }
    };

    validate(operator, &term)?;

    let statement = match (&term, operator) {
        (Term::Number(n), op) => format!("{} {} {}", attribute, op, n),
        (_, Operator::Neq) => format!("NOT {}:{}", attribute, term),
        _ => format!("{}:{}", attribute, term),
    };
    Ok(Some(statement))
}
