//! Attribute tree loader for **Tapestry** widget markup (`.gui` files).
//!
//! Markup is plain XML: element tags name widget types, attributes carry
//! widget configuration or variable bindings, and text content is handed to
//! the widget. This crate only turns the text into an [`AttributeNode`] tree;
//! it knows nothing about widgets or toolkits.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`] | `AttributeNode` |
//! | [`error`] | `ParseError` |
//! | [`parser`] | `parse_str` / `parse_bytes` entry points |
//!
//! # Quick start
//!
//! ```rust
//! use tapestry_markup::parse_str;
//!
//! let src = r#"
//!     <Window title=':Hello'>
//!         <Entry changed='c' value='v:start'/>
//!     </Window>
//! "#;
//!
//! let root = parse_str(src).unwrap();
//! assert_eq!(root.tag, "Window");
//! assert_eq!(root.children[0].attr("value"), Some("v:start"));
//! ```

pub mod error;
pub mod node;
pub mod parser;

pub use error::ParseError;
pub use node::AttributeNode;
pub use parser::{parse_bytes, parse_str};
