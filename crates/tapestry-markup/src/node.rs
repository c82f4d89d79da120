use std::collections::BTreeMap;
use std::fmt;

// ── AttributeNode ─────────────────────────────────────────────────────────

/// One element of a parsed markup document.
///
/// ```xml
/// <Entry changed='c' value='v:start'/>
/// ```
///
/// The tree is toolkit-agnostic: tags are widget type names, attributes are
/// either widget configuration or variable bindings, and it is up to the
/// widget constructor to decide which is which.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeNode {
    /// Widget type name: `"Window"`, `"Entry"`, ...
    pub tag: String,
    /// Attributes in name order.
    pub attributes: BTreeMap<String, String>,
    /// Nested child elements in document order.
    pub children: Vec<AttributeNode>,
    /// Trimmed text content directly inside the element, if any.
    pub text: Option<String>,
}

impl AttributeNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: AttributeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Append a text run line by line, trimming each line and dropping blank ones.
    pub(crate) fn push_text(&mut self, run: &str) {
        for line in run.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match &mut self.text {
                Some(text) => {
                    text.push('\n');
                    text.push_str(line);
                }
                None => self.text = Some(line.to_string()),
            }
        }
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "\t".repeat(indent);
        write!(f, "{pad}<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{}\"", escape(value))?;
        }
        if self.children.is_empty() && self.text.is_none() {
            return writeln!(f, "/>");
        }
        writeln!(f, ">")?;
        if let Some(text) = &self.text {
            for line in text.lines() {
                writeln!(f, "{pad}\t{}", escape(line))?;
            }
        }
        for child in &self.children {
            child.dump(f, indent + 1)?;
        }
        writeln!(f, "{pad}</{}>", self.tag)
    }
}

/// Dumps the node back to indented markup that parses to an equal tree.
impl fmt::Display for AttributeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
