use crate::errors::FilterError;
use crate::operator::Operator;
use crate::statement::build_statement;
use crate::value::{Number, Value};
use log::trace;
use std::fmt;

const AND: &str = " AND ";
const OR: &str = " OR ";
const GROUP_START: &str = "(";
const GROUP_END: &str = ")";

/// Ordered filter fragments: statements, joiners and group delimiters.
///
/// Joiners are materialized as fragments, so rendering is plain concatenation.
#[derive(Debug, Clone, Default)]
struct Statements {
    parts: Vec<String>,
}

impl Statements {
    fn append_and(&mut self, statement: Option<String>) {
        self.append(AND, statement);
    }

    fn append_or(&mut self, statement: Option<String>) {
        self.append(OR, statement);
    }

    fn append(&mut self, joiner: &str, statement: Option<String>) {
        let Some(statement) = statement else {
            return;
        };

        let on_group_start = self.parts.last().is_some_and(|p| p == GROUP_START);
        if !self.parts.is_empty() && !on_group_start {
            self.parts.push(joiner.to_string());
        }
        trace!("Appending filter fragment {}", statement);
        self.parts.push(statement);
    }

    fn open_group(&mut self) {
        self.append_and(Some(GROUP_START.to_string()));
    }

    fn close_group(&mut self) {
        self.parts.push(GROUP_END.to_string());
    }

    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn render(&self) -> String {
        self.parts.concat()
    }
}

/// Fluent builder for search-engine filter strings.
///
/// ```
/// use search_filter::QueryBuilder;
///
/// let filter = QueryBuilder::new()
///     .where_equals("brand", "acme")
///     .where_less_than("price", 100)
///     .where_in("color", ["red", "dark blue"])
///     .build();
/// assert_eq!(filter, r#"brand:acme AND price < 100 AND (color:red OR color:"dark blue")"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    statements: Statements,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `attribute = value`
    pub fn where_value(&mut self, attribute: &str, value: impl Into<Value>) -> &mut Self {
        self.where_equals(attribute, value)
    }

    /// Adds a condition with an explicit operator.
    ///
    /// Fails with [`FilterError::InvalidOperator`] when an ordering operator
    /// meets a non-numeric value; the builder is left as it was.
    pub fn where_op(
        &mut self,
        attribute: &str,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<&mut Self, FilterError> {
        let statement = build_statement(attribute, operator, value.into())?;
        self.statements.append_and(statement);
        Ok(self)
    }

    pub fn where_not(&mut self, attribute: &str, value: impl Into<Value>) -> &mut Self {
        self.push_equality(attribute, Operator::Neq, value.into())
    }

    pub fn where_equals(&mut self, attribute: &str, value: impl Into<Value>) -> &mut Self {
        self.push_equality(attribute, Operator::Eq, value.into())
    }

    pub fn where_less_than(&mut self, attribute: &str, value: impl Into<Number>) -> &mut Self {
        self.push_number(attribute, Operator::Lt, value.into())
    }

    pub fn where_greater_than(&mut self, attribute: &str, value: impl Into<Number>) -> &mut Self {
        self.push_number(attribute, Operator::Gt, value.into())
    }

    /// `(attribute:a OR attribute:b ...)`. An empty list adds nothing.
    pub fn where_in<I>(&mut self, attribute: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.push_group(attribute, Operator::Eq, values)
    }

    /// `(NOT attribute:a AND NOT attribute:b ...)`. An empty list adds nothing.
    pub fn where_not_in<I>(&mut self, attribute: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.push_group(attribute, Operator::Neq, values)
    }

    pub fn when<F>(&mut self, condition: bool, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if condition {
            f(self);
        }
        self
    }

    pub fn unless<F>(&mut self, condition: bool, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.when(!condition, f)
    }

    /// Like [`when`](Self::when), for closures that add fallible conditions.
    pub fn try_when<F>(&mut self, condition: bool, f: F) -> Result<&mut Self, FilterError>
    where
        F: FnOnce(&mut Self) -> Result<(), FilterError>,
    {
        if condition {
            f(self)?;
        }
        Ok(self)
    }

    pub fn try_unless<F>(&mut self, condition: bool, f: F) -> Result<&mut Self, FilterError>
    where
        F: FnOnce(&mut Self) -> Result<(), FilterError>,
    {
        self.try_when(!condition, f)
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn build(&self) -> String {
        self.statements.render()
    }

    fn push_equality(&mut self, attribute: &str, operator: Operator, value: Value) -> &mut Self {
        let statement = Self::equality_statement(attribute, operator, value);
        self.statements.append_and(statement);
        self
    }

    fn push_number(&mut self, attribute: &str, operator: Operator, value: Number) -> &mut Self {
        // Numbers satisfy every operator
        let statement = build_statement(attribute, operator, Value::Number(value)).unwrap_or(None);
        self.statements.append_and(statement);
        self
    }

    fn push_group<I>(&mut self, attribute: &str, operator: Operator, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return self;
        }

        self.statements.open_group();
        for value in values {
            let statement = Self::equality_statement(attribute, operator, value.into());
            match operator {
                Operator::Neq => self.statements.append_and(statement),
                _ => self.statements.append_or(statement),
            }
        }
        self.statements.close_group();
        self
    }

    // Eq and Neq accept every value kind, validation cannot fail here
    fn equality_statement(attribute: &str, operator: Operator, value: Value) -> Option<String> {
        debug_assert!(!operator.is_comparison());
        build_statement(attribute, operator, value).unwrap_or(None)
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.build())
    }
}
