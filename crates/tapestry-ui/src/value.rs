use std::fmt;

/// A value crossing the namespace boundary.
///
/// Markup literals arrive as `Str`; widgets convert on the way in and report
/// their native type on the way out.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
    Number(f64),
    List(Vec<String>),
}

/// A value a widget or conversion refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue(pub String);

impl InvalidValue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidValue {}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Accepts booleans, `True`/`False` in either case, and numbers (non-zero is true).
    pub fn to_bool(&self) -> Result<bool, InvalidValue> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Str(s) => match s.trim() {
                "True" | "true" => Ok(true),
                "False" | "false" => Ok(false),
                other => Err(InvalidValue(format!("`{other}` is not True or False"))),
            },
            Self::List(_) => Err(InvalidValue::new("a list is not a boolean")),
        }
    }

    pub fn to_number(&self) -> Result<f64, InvalidValue> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| InvalidValue(format!("`{s}` is not a number"))),
            Self::Bool(_) | Self::List(_) => Err(InvalidValue::new("expected a number")),
        }
    }

    /// Lists pass through; strings split into trimmed, non-empty lines.
    pub fn to_list(&self) -> Result<Vec<String>, InvalidValue> {
        match self {
            Self::List(items) => Ok(items.clone()),
            Self::Str(s) => Ok(s
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Self::Bool(_) | Self::Number(_) => Err(InvalidValue::new("expected a list")),
        }
    }

    /// Text rendering used when a widget wants a string.
    pub fn into_text(self) -> String {
        match self {
            Self::Str(s) => s,
            other => other.to_string(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Str(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Number(n) => write!(f, "{n}"),
            Self::List(items) => f.write_str(&items.join("\n")),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Self::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Self::Str(s) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Self::Number(n) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Self::Number(n.into()) }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self { Self::List(items) }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
