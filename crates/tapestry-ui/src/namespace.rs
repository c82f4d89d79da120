use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Access, GuiError};
use crate::toolkit::Toolkit;
use crate::value::Value;
use crate::variable::{Callback, DataStore, EventSlot, Reader, VariableKind, Writer};

/// What one name resolves to.
///
/// Get and set slots belong to a single widget (`owner`). Event slots and
/// data cells are shared: several widgets may declare the same name and all
/// of them reach the same callback or cell.
struct Entry<T: Toolkit> {
    owner: Option<usize>,
    get: Option<Reader>,
    set: Option<Writer>,
    event: Option<EventSlot<T>>,
    data: bool,
}

impl<T: Toolkit> Entry<T> {
    fn new(owner: Option<usize>) -> Self {
        Self { owner, get: None, set: None, event: None, data: false }
    }

    fn kinds(&self) -> Vec<VariableKind> {
        let mut kinds = Vec::new();
        if self.get.is_some() {
            kinds.push(VariableKind::Get);
        }
        if self.set.is_some() {
            kinds.push(VariableKind::Set);
        }
        if self.event.is_some() {
            kinds.push(VariableKind::Event);
        }
        if self.data {
            kinds.push(VariableKind::Data);
        }
        kinds
    }

    fn holds_value(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }
}

/// Flat, GUI-wide variable namespace.
pub(crate) struct Namespace<T: Toolkit> {
    entries: RefCell<BTreeMap<String, Entry<T>>>,
    data: DataStore,
}

fn duplicate(name: &str) -> GuiError {
    GuiError::DuplicateBinding { name: name.to_string() }
}

fn unknown(name: &str) -> GuiError {
    GuiError::UnknownVariable { name: name.to_string() }
}

fn unsupported(name: &str, access: Access) -> GuiError {
    GuiError::UnsupportedAccess { name: name.to_string(), access }
}

impl<T: Toolkit> Namespace<T> {
    pub(crate) fn new() -> Self {
        Self { entries: RefCell::new(BTreeMap::new()), data: DataStore::default() }
    }

    pub(crate) fn data(&self) -> &DataStore {
        &self.data
    }

    // ── Declaration ───────────────────────────────────────────────────────

    pub(crate) fn declare_get(&self, owner: usize, name: &str, reader: Reader) -> Result<(), GuiError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(name.to_string()).or_insert_with(|| Entry::new(Some(owner)));
        if entry.owner != Some(owner) || entry.get.is_some() || entry.event.is_some() || entry.data {
            return Err(duplicate(name));
        }
        entry.get = Some(reader);
        Ok(())
    }

    pub(crate) fn declare_set(&self, owner: usize, name: &str, writer: Writer) -> Result<(), GuiError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(name.to_string()).or_insert_with(|| Entry::new(Some(owner)));
        if entry.owner != Some(owner) || entry.set.is_some() || entry.event.is_some() || entry.data {
            return Err(duplicate(name));
        }
        entry.set = Some(writer);
        Ok(())
    }

    /// The slot for event `name`, created on first declaration.
    pub(crate) fn declare_event(&self, name: &str) -> Result<EventSlot<T>, GuiError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(name.to_string()).or_insert_with(|| Entry::new(None));
        if entry.holds_value() || entry.data {
            return Err(duplicate(name));
        }
        let slot = entry.event.get_or_insert_with(|| Rc::new(RefCell::new(None)));
        Ok(slot.clone())
    }

    /// Declare data cell `name`. Only the first declaration seeds the cell.
    pub(crate) fn declare_data(&self, name: &str, initial: Value) -> Result<(), GuiError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(name.to_string()).or_insert_with(|| Entry::new(None));
        if entry.holds_value() || entry.event.is_some() {
            return Err(duplicate(name));
        }
        entry.data = true;
        self.data.init(name, initial);
        Ok(())
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub(crate) fn get(&self, name: &str) -> Result<Value, GuiError> {
        // Clone the reader out so it runs without the table borrowed.
        let (reader, is_data) = {
            let entries = self.entries.borrow();
            let entry = entries.get(name).ok_or_else(|| unknown(name))?;
            (entry.get.clone(), entry.data)
        };
        match reader {
            Some(read) => Ok(read()),
            None if is_data => Ok(self.data.get(name).unwrap_or_default()),
            None => Err(unsupported(name, Access::Read)),
        }
    }

    pub(crate) fn set(&self, name: &str, value: Value) -> Result<(), GuiError> {
        let (writer, is_data) = {
            let entries = self.entries.borrow();
            let entry = entries.get(name).ok_or_else(|| unknown(name))?;
            (entry.set.clone(), entry.data)
        };
        log::trace!("set `{name}` = {value:?}");
        match writer {
            Some(write) => write(value).map_err(|e| GuiError::InvalidValue {
                name: name.to_string(),
                reason: e.0,
            }),
            None if is_data => {
                self.data.set(name, value);
                Ok(())
            }
            None => Err(unsupported(name, Access::Write)),
        }
    }

    /// Install `callback` for event `name`, replacing any earlier one.
    pub(crate) fn on(&self, name: &str, callback: Callback<T>) -> Result<(), GuiError> {
        let slot = {
            let entries = self.entries.borrow();
            let entry = entries.get(name).ok_or_else(|| unknown(name))?;
            entry.event.clone().ok_or_else(|| unsupported(name, Access::Subscribe))?
        };
        if slot.borrow_mut().replace(callback).is_some() {
            log::debug!("callback for `{name}` replaced");
        }
        Ok(())
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub(crate) fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub(crate) fn variables(&self) -> Vec<(String, Vec<VariableKind>)> {
        self.entries
            .borrow()
            .iter()
            .map(|(name, entry)| (name.clone(), entry.kinds()))
            .collect()
    }
}
