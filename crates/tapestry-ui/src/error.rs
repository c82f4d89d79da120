use std::fmt;
use std::path::PathBuf;

use tapestry_markup::ParseError;

/// How a variable was being accessed when access failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Subscribe,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "written",
            Self::Subscribe => "subscribed to",
        })
    }
}

/// Everything that can go wrong while building or driving a GUI.
///
/// Construction errors (everything up to and including `DuplicateBinding`)
/// abort the build; no partially built GUI is returned. Runtime errors are
/// local to the offending access.
#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("cannot read markup from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no widget registered for tag <{tag}>")]
    UnknownWidget { tag: String },

    #[error("malformed widget tree: {0}")]
    MalformedTree(String),

    #[error("<{tag}> does not use {}", .attributes.join(", "))]
    UnusedAttributes { tag: String, attributes: Vec<String> },

    #[error("<{tag}> attribute `{attribute}`: {reason}")]
    InvalidAttribute { tag: String, attribute: String, reason: String },

    #[error("no toolkit object supplied under id `{id}`")]
    UnknownExternal { id: String },

    #[error("variable `{name}` is declared twice with incompatible kinds")]
    DuplicateBinding { name: String },

    #[error("no variable named `{name}`")]
    UnknownVariable { name: String },

    #[error("variable `{name}` cannot be {access}")]
    UnsupportedAccess { name: String, access: Access },

    #[error("invalid value for `{name}`: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("no loop is running")]
    NoActiveLoop,

    #[error("toolkit error: {0}")]
    Toolkit(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GuiError {
    pub fn toolkit(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Toolkit(Box::new(err))
    }
}
