//! Built-in widget catalog for the headless `tapestry-engine` toolkit.
//!
//! Each constructor maps markup attributes onto engine properties and
//! signals. State is never cached here: readers query the engine object on
//! every call.

pub mod boxes;
pub mod button;
pub mod combo;
pub mod entry;
pub mod file_chooser;
pub mod frame;
pub mod label;
pub mod notebook;
pub mod separator;
pub mod spin;
pub mod table;
pub mod window;

use tapestry_engine::{Engine, LoopError, Object, Property};

use crate::error::GuiError;
use crate::registry::Registry;
use crate::toolkit::Toolkit;
use crate::value::{InvalidValue, Value};
use crate::variable::Trigger;

impl Toolkit for Engine {
    type Handle = Object;
    type Error = LoopError;

    fn show(&self, root: &Object) {
        root.show_all();
    }

    fn on_destroy(&self, root: &Object, hook: Box<dyn Fn()>) {
        if let Err(e) = root.connect("destroy", move |_| hook()) {
            log::error!("cannot watch {} for destruction: {e}", root.class_name());
        }
    }

    fn run_loop(&self) -> Result<(), LoopError> {
        self.run()
    }

    fn quit_loop(&self) {
        self.quit();
    }

    fn register_builtins(registry: &mut Registry<Self>) {
        register(registry);
    }
}

/// Register every built-in engine widget under its markup tag.
pub fn register(registry: &mut Registry<Engine>) {
    registry.register("Window", window::Window);
    registry.register("VBox", boxes::Boxed::VERTICAL);
    registry.register("HBox", boxes::Boxed::HORIZONTAL);
    registry.register("Notebook", notebook::Notebook);
    registry.register("Label", label::Label);
    registry.register("Button", button::Button);
    registry.register("CheckButton", button::CheckButton);
    registry.register("Entry", entry::Entry);
    registry.register("Frame", frame::Frame);
    registry.register("SpinButton", spin::SpinButton);
    registry.register("Table", table::Table);
    registry.register("FileChooserButton", file_chooser::FileChooserButton);
    registry.register("ComboBoxText", combo::Combo::TEXT);
    registry.register("ComboBoxEntryText", combo::Combo::ENTRY);
    registry.register("HSeparator", separator::Separator::HORIZONTAL);
    registry.register("VSeparator", separator::Separator::VERTICAL);
}

impl From<Property> for Value {
    fn from(p: Property) -> Self {
        match p {
            Property::Text(s) => Value::Str(s),
            Property::Flag(b) => Value::Bool(b),
            Property::Number(n) => Value::Number(n),
            Property::Items(items) => Value::List(items),
        }
    }
}

// ── Construction helpers ──────────────────────────────────────────────────

pub(crate) fn create(class: &str) -> Result<Object, GuiError> {
    Object::new(class).map_err(GuiError::toolkit)
}

pub(crate) fn attach(parent: &Object, child: &Object) -> Result<(), GuiError> {
    parent.add(child).map_err(GuiError::toolkit)
}

pub(crate) fn configure(obj: &Object, name: &str, value: impl Into<Property>) -> Result<(), GuiError> {
    obj.set_property(name, value.into()).map_err(GuiError::toolkit)
}

pub(crate) fn pack(child: &Object, name: &str, value: impl Into<Property>) -> Result<(), GuiError> {
    child.set_child_property(name, value.into()).map_err(GuiError::toolkit)
}

// ── Variable plumbing ─────────────────────────────────────────────────────

/// Converts a namespace value into the native property type.
pub(crate) type Convert = fn(Value) -> Result<Property, InvalidValue>;

pub(crate) fn text(v: Value) -> Result<Property, InvalidValue> {
    Ok(Property::Text(v.into_text()))
}

pub(crate) fn flag(v: Value) -> Result<Property, InvalidValue> {
    v.to_bool().map(Property::Flag)
}

pub(crate) fn number(v: Value) -> Result<Property, InvalidValue> {
    v.to_number().map(Property::Number)
}

pub(crate) fn reader(obj: &Object, name: &'static str) -> impl Fn() -> Value + 'static {
    let obj = obj.clone();
    move || obj.property(name).map(Value::from).unwrap_or_default()
}

pub(crate) fn writer(
    obj: &Object,
    name: &'static str,
    convert: Convert,
) -> impl Fn(Value) -> Result<(), InvalidValue> + 'static {
    let obj = obj.clone();
    move |value| native(obj.set_property(name, convert(value)?))
}

/// Writer for placement property `name`, held by `child` for its container.
pub(crate) fn placement(
    child: &Object,
    name: &'static str,
    convert: Convert,
) -> impl Fn(Value) -> Result<(), InvalidValue> + 'static {
    let child = child.clone();
    move |value| native(child.set_child_property(name, convert(value)?))
}

/// Registrar wiring an event trigger to native signal `signal`.
pub(crate) fn signal(obj: &Object, signal: &'static str) -> impl FnOnce(Trigger) + 'static {
    let obj = obj.clone();
    move |trigger| {
        if let Err(e) = obj.connect(signal, move |_| trigger()) {
            log::error!("cannot connect {}::{signal}: {e}", obj.class_name());
        }
    }
}

/// Engine refusals become value errors at the namespace boundary.
pub(crate) fn native<E: std::fmt::Display>(result: Result<(), E>) -> Result<(), InvalidValue> {
    result.map_err(|e| InvalidValue(e.to_string()))
}
