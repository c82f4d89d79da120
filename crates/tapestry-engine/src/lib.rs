//! Tapestry engine crate.
//!
//! A headless widget toolkit: native objects with typed properties and
//! signals, a static class table, and a nested blocking main loop driven by
//! posted tasks. Higher layers bind to it through `tapestry-ui`.

pub mod class;
pub mod error;
pub mod logging;
pub mod main_loop;
pub mod object;
pub mod property;

pub use error::{LoopError, ObjectError};
pub use main_loop::Engine;
pub use object::{HandlerId, Object};
pub use property::Property;
