//! Tapestry UI: declarative widget trees bound to a name-addressed namespace.
//!
//! Markup names the widgets; binding attributes name the variables the
//! application talks to. Every variable is one of four kinds:
//!
//! | kind    | access                         | backed by                  |
//! |---------|--------------------------------|----------------------------|
//! | `get`   | [`Gui::get`]                   | live widget state          |
//! | `set`   | [`Gui::set`]                   | live widget state          |
//! | `event` | [`Gui::on`]                    | a native signal            |
//! | `data`  | [`Gui::get`] / [`Gui::set`]    | a shared cell, no widget   |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tapestry_ui::prelude::*;
//!
//! let gui = Gui::builder(Engine::new())
//!     .markup(r#"
//!         <Window title=':Greeter'>
//!             <VBox>
//!                 <Entry value='name:World' activate='greet'/>
//!                 <Label value='greeting'/>
//!             </VBox>
//!         </Window>"#)
//!     .event("greet", |gui| {
//!         let name = gui.get("name").unwrap();
//!         gui.set("greeting", format!("Hello, {name}!")).unwrap();
//!     })
//!     .build()?;
//! gui.run(true)?;
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`WidgetConstructor`] for the toolkit and hand it to
//! [`GuiBuilder::widget`]; custom tags sit next to the built-in ones and may
//! replace them.

pub mod builder;
pub mod error;
pub mod gui;
mod namespace;
pub mod registry;
mod run;
pub mod toolkit;
pub mod value;
pub mod variable;
pub mod widget;
pub mod widgets;

pub use error::{Access, GuiError};
pub use gui::{Gui, GuiBuilder};
pub use registry::Registry;
pub use toolkit::Toolkit;
pub use value::{InvalidValue, Value};
pub use variable::{DataStore, Template, Trigger, VariableKind};
pub use widget::{Attributes, BuildCx, Child, Constructed, FnConstructor, WidgetConstructor};

/// Everything an application or custom widget needs.
pub mod prelude {
    pub use crate::error::{Access, GuiError};
    pub use crate::gui::{Gui, GuiBuilder};
    pub use crate::registry::Registry;
    pub use crate::toolkit::Toolkit;
    pub use crate::value::{InvalidValue, Value};
    pub use crate::variable::{DataStore, Template, Trigger, VariableKind};
    pub use crate::widget::{BuildCx, Child, Constructed, WidgetConstructor};

    pub use tapestry_engine::{Engine, Object, Property};
}
