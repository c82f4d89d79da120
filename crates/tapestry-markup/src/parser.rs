use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::node::AttributeNode;

// ── Tree builder ──────────────────────────────────────────────────────────

/// Event-driven tree builder over the quick-xml tokenizer.
///
/// Open elements live on `stack`; a closed element is appended to its parent
/// or, when the stack is empty, becomes the document root.
struct TreeBuilder<'s> {
    src: &'s [u8],
    stack: Vec<AttributeNode>,
    root: Option<AttributeNode>,
}

impl<'s> TreeBuilder<'s> {
    fn new(src: &'s str) -> Self {
        Self { src: src.as_bytes(), stack: Vec::new(), root: None }
    }

    fn err(&self, msg: impl Into<String>, offset: usize) -> ParseError {
        ParseError::at(msg, self.src, offset)
    }

    fn element(&self, e: &BytesStart<'_>, offset: usize) -> Result<AttributeNode, ParseError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(self.err("content after the root element", offset));
        }
        let tag = std::str::from_utf8(e.name().as_ref())
            .map_err(|_| self.err("element name is not valid UTF-8", offset))?
            .to_string();
        let mut node = AttributeNode::new(tag);
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.err(format!("bad attribute: {err}"), offset))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|_| self.err("attribute name is not valid UTF-8", offset))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| self.err(format!("bad value for `{key}`: {err}"), offset))?
                .into_owned();
            node.attributes.insert(key, value);
        }
        Ok(node)
    }

    fn close(&mut self, node: AttributeNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }

    fn text(&mut self, run: &str, offset: usize) -> Result<(), ParseError> {
        match self.stack.last_mut() {
            Some(open) => {
                open.push_text(run);
                Ok(())
            }
            None if run.trim().is_empty() => Ok(()),
            None => Err(self.err("text outside the root element", offset)),
        }
    }

    fn run(mut self, reader: &mut Reader<&[u8]>) -> Result<AttributeNode, ParseError> {
        loop {
            let offset = reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.element(&e, offset)?;
                    self.stack.push(node);
                }
                Ok(Event::Empty(e)) => {
                    let node = self.element(&e, offset)?;
                    self.close(node);
                }
                Ok(Event::End(_)) => {
                    let node = self
                        .stack
                        .pop()
                        .ok_or_else(|| self.err("closing tag without an open element", offset))?;
                    self.close(node);
                }
                Ok(Event::Text(t)) => {
                    let run = t
                        .unescape()
                        .map_err(|err| self.err(format!("bad text: {err}"), offset))?;
                    self.text(&run, offset)?;
                }
                Ok(Event::CData(c)) => {
                    let bytes = c.into_inner();
                    let run = std::str::from_utf8(&bytes)
                        .map_err(|_| self.err("CDATA is not valid UTF-8", offset))?
                        .to_string();
                    self.text(&run, offset)?;
                }
                Ok(Event::Eof) => break,
                // Comments, declarations, doctypes, processing instructions.
                Ok(_) => {}
                Err(err) => {
                    let at = (reader.error_position() as usize).max(offset);
                    return Err(self.err(err.to_string(), at));
                }
            }
        }

        if let Some(open) = self.stack.last() {
            let end = self.src.len();
            return Err(self.err(format!("unclosed element <{}>", open.tag), end));
        }
        self.root.ok_or_else(|| ParseError::new("document has no root element", 1, 1))
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parse a markup string into its [`AttributeNode`] tree.
pub fn parse_str(src: &str) -> Result<AttributeNode, ParseError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(true);
    TreeBuilder::new(src).run(&mut reader)
}

/// Parse raw markup bytes, rejecting input that is not UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<AttributeNode, ParseError> {
    match std::str::from_utf8(bytes) {
        Ok(src) => parse_str(src),
        Err(err) => Err(ParseError::at(
            format!("invalid UTF-8: {err}"),
            bytes,
            err.valid_up_to(),
        )),
    }
}
