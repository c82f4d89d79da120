use std::fmt;

/// Errors raised by native object operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectError {
    UnknownClass(String),
    UnknownProperty { class: &'static str, name: String },
    UnknownSignal { class: &'static str, name: String },
    /// The value's kind does not match the property's declared kind.
    TypeMismatch { class: &'static str, name: String, expected: &'static str },
    /// The value is outside what the property currently accepts.
    OutOfRange { class: &'static str, name: String, value: f64 },
    TooManyChildren { class: &'static str, max: usize },
    AlreadyParented { class: &'static str },
    /// A child property was set on an object that has no parent.
    NoParent { class: &'static str },
    Destroyed { class: &'static str },
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass(name) => write!(f, "unknown widget class `{name}`"),
            Self::UnknownProperty { class, name } => {
                write!(f, "{class} has no property `{name}`")
            }
            Self::UnknownSignal { class, name } => write!(f, "{class} has no signal `{name}`"),
            Self::TypeMismatch { class, name, expected } => {
                write!(f, "{class}.{name} expects a {expected} value")
            }
            Self::OutOfRange { class, name, value } => {
                write!(f, "{value} is out of range for {class}.{name}")
            }
            Self::TooManyChildren { class, max } => {
                write!(f, "{class} holds at most {max} child widget(s)")
            }
            Self::AlreadyParented { class } => write!(f, "{class} already has a parent"),
            Self::NoParent { class } => write!(f, "{class} has no parent container"),
            Self::Destroyed { class } => write!(f, "{class} has been destroyed"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Errors raised by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopError {
    /// The loop at `level` ran out of work before anything asked it to quit.
    Starved { level: usize },
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starved { level } => {
                write!(f, "main loop level {level} has no pending work and no quit request")
            }
        }
    }
}

impl std::error::Error for LoopError {}
