/// A native property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Text(String),
    Flag(bool),
    Number(f64),
    Items(Vec<String>),
}

impl Property {
    /// Human-readable kind name, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Number(_) => "number",
            Self::Items(_) => "items",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            Self::Items(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Property {
    fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for Property {
    fn from(s: String) -> Self { Self::Text(s) }
}

impl From<bool> for Property {
    fn from(b: bool) -> Self { Self::Flag(b) }
}

impl From<f64> for Property {
    fn from(n: f64) -> Self { Self::Number(n) }
}

impl From<Vec<String>> for Property {
    fn from(items: Vec<String>) -> Self { Self::Items(items) }
}
