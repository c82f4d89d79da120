use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::gui::Gui;
use crate::value::{InvalidValue, Value};

/// Reads live widget state.
pub type Reader = Rc<dyn Fn() -> Value>;

/// Writes widget state; the widget may refuse the value.
pub type Writer = Rc<dyn Fn(Value) -> Result<(), InvalidValue>>;

/// Fires an event slot. Handed to a [`Registrar`] to be wired to a native signal.
pub type Trigger = Rc<dyn Fn()>;

/// Connects a trigger to the native signal behind an event.
pub type Registrar = Box<dyn FnOnce(Trigger)>;

/// Application callback for an event; receives the whole GUI.
pub type Callback<T> = Rc<dyn Fn(&Gui<T>)>;

/// The variable kinds a name can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariableKind {
    Get,
    Set,
    Event,
    Data,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Event => "event",
            Self::Data => "data",
        })
    }
}

/// A variable as declared by a widget constructor, before it has a name.
///
/// The binding attribute in the markup supplies the name, and optionally an
/// initial literal (`value='name:initial'`).
pub enum Template {
    Get(Reader),
    Set { writer: Writer, default: Option<Value> },
    /// One widget exposing read and write access under a single name.
    GetSet { reader: Reader, writer: Writer, default: Option<Value> },
    Event(Registrar),
    Data { default: Option<Value> },
}

// ── DataStore ─────────────────────────────────────────────────────────────

/// Shared key-value cells without toolkit backing.
///
/// Owned by the namespace; constructors receive a reference through their
/// build context and may keep a clone for their callbacks.
#[derive(Clone, Default)]
pub struct DataStore(Rc<RefCell<HashMap<String, Value>>>);

impl DataStore {
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    /// Seed a cell unless it already holds a value.
    pub(crate) fn init(&self, name: &str, value: Value) {
        self.0.borrow_mut().entry(name.to_string()).or_insert(value);
    }
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

/// Shared callback slot for one event name.
pub(crate) type EventSlot<T> = Rc<RefCell<Option<Callback<T>>>>;
