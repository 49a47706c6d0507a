use serde::{Deserialize, Deserializer};
use std::fmt;

/// Raw condition value as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    Text(String),
    Number(Number),
    Boolean(bool),
    #[default]
    Absent,
}

// Shape of a value inside a filter document; null maps to Absent
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Boolean(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Value after normalization; only these ever reach the formatter
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Quoted(String),
    Bare(String),
    Number(Number),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Boolean => write!(f, "boolean"),
        }
    }
}

impl Number {
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(n) => n.is_finite(),
        }
    }

    /// Parses numeric-looking text such as "123", "-123" or "1.5".
    /// Non-finite spellings ("inf", "NaN") are rejected.
    pub fn parse(s: &str) -> Option<Number> {
        if let Ok(i) = s.parse::<i64>() {
            return Some(Number::Int(i));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::Float(f)),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            // -0.0 renders as 0
            Number::Float(n) if *n == 0.0 => write!(f, "0"),
            // Positional digits only inside [1e-6, 1e21), exponent form outside
            Number::Float(n) if (1e-6..1e21).contains(&n.abs()) => write!(f, "{}", n),
            Number::Float(n) => {
                let exp = format!("{:e}", n);
                match exp.split_once('e') {
                    Some((mantissa, power)) if !power.starts_with('-') => {
                        write!(f, "{}e+{}", mantissa, power)
                    }
                    _ => write!(f, "{}", exp),
                }
            }
        }
    }
}

impl Term {
    pub fn kind(&self) -> ValueKind {
        match self {
            Term::Quoted(_) | Term::Bare(_) => ValueKind::String,
            Term::Number(_) => ValueKind::Number,
            Term::Boolean(_) => ValueKind::Boolean,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Quoted(s) => write!(f, "\"{}\"", s),
            Term::Bare(s) => write!(f, "{}", s),
            Term::Number(n) => write!(f, "{}", n),
            Term::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
        }
    }
}

/// Classifies a raw value. Returns `None` when the value must be omitted
/// from the filter (absent, empty text, non-finite number).
pub fn normalize(value: Value) -> Option<Term> {
    match value {
        Value::Boolean(b) => Some(Term::Boolean(b)),
        Value::Text(s) => {
            if s.is_empty() {
                None
            } else if s.chars().any(char::is_whitespace) {
                Some(Term::Quoted(s))
            } else if let Some(n) = Number::parse(&s) {
                Some(Term::Number(n))
            } else {
                Some(Term::Bare(s))
            }
        }
        Value::Number(n) if n.is_finite() => Some(Term::Number(n)),
        Value::Number(_) | Value::Absent => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Absent, Into::into)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Boolean(b)) => Value::Boolean(b),
            Some(Scalar::Int(i)) => Value::Number(Number::Int(i)),
            Some(Scalar::Float(f)) => Value::Number(Number::Float(f)),
            Some(Scalar::Text(s)) => Value::Text(s),
            None => Value::Absent,
        };
        Ok(value)
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::Int(n as i64)
            }
        })*
    };
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(n.into())
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);
value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Number::Float(n as f64), Number::Int)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::from(n as u64)
    }
}

impl From<f32> for Number {
    // Widen through the shortest decimal form so 0.1f32 stays 0.1
    fn from(n: f32) -> Self {
        Number::Float(n.to_string().parse().unwrap_or(n as f64))
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}
