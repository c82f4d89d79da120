use std::fmt;

/// A parse error from a `.gui` markup document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based source column (in bytes) where the error occurred.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }

    /// Build an error located at byte `offset` of `src`.
    pub(crate) fn at(msg: impl Into<String>, src: &[u8], offset: usize) -> Self {
        let upto = &src[..offset.min(src.len())];
        let line = upto.iter().filter(|b| **b == b'\n').count() + 1;
        let col = match upto.iter().rposition(|b| *b == b'\n') {
            Some(nl) => upto.len() - nl,
            None => upto.len() + 1,
        };
        Self::new(msg, line, col)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "markup parse error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}
