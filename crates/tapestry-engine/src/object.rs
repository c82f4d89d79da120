use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::class::ClassSpec;
use crate::error::ObjectError;
use crate::property::Property;

/// Identifies a connected signal handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Handler {
    id: HandlerId,
    signal: String,
    callback: Rc<dyn Fn(&Object)>,
}

struct ObjectData {
    class: &'static ClassSpec,
    properties: RefCell<HashMap<&'static str, Property>>,
    /// Placement properties owned by the parent container.
    child_properties: RefCell<HashMap<&'static str, Property>>,
    children: RefCell<Vec<Object>>,
    parent: RefCell<Weak<ObjectData>>,
    handlers: RefCell<Vec<Handler>>,
    next_handler: Cell<u64>,
    visible: Cell<bool>,
    destroyed: Cell<bool>,
}

// ── Object ────────────────────────────────────────────────────────────────

/// A native widget: typed properties, signals and a containment tree.
///
/// `Object` is a cheap reference-counted handle; clones refer to the same
/// widget. Children are owned by their parent, the parent link is weak.
///
/// Property writes that change a watched property emit its notify signal
/// synchronously, exactly like a user edit would:
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tapestry_engine::{Object, Property};
///
/// let entry = Object::new("Entry").unwrap();
/// let hits = Rc::new(Cell::new(0));
/// let seen = hits.clone();
/// entry.connect("changed", move |_| seen.set(seen.get() + 1)).unwrap();
///
/// entry.set_property("text", Property::from("hello")).unwrap();
/// entry.set_property("text", Property::from("hello")).unwrap();
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

impl Object {
    pub fn new(class: &str) -> Result<Self, ObjectError> {
        let spec = ClassSpec::lookup(class)
            .ok_or_else(|| ObjectError::UnknownClass(class.to_string()))?;
        let properties = spec
            .properties
            .iter()
            .map(|p| (p.name, p.initial.to_property()))
            .collect();
        log::trace!("created native {class}");
        Ok(Self(Rc::new(ObjectData {
            class: spec,
            properties: RefCell::new(properties),
            child_properties: RefCell::new(HashMap::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            handlers: RefCell::new(Vec::new()),
            next_handler: Cell::new(0),
            visible: Cell::new(false),
            destroyed: Cell::new(false),
        })))
    }

    pub fn class_name(&self) -> &'static str {
        self.0.class.name
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ── Properties ────────────────────────────────────────────────────────

    pub fn property(&self, name: &str) -> Result<Property, ObjectError> {
        self.0
            .properties
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| self.unknown_property(name))
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.property(name).ok()?.as_text().map(str::to_string)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.property(name).ok()?.as_flag()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.property(name).ok()?.as_number()
    }

    /// Store a property value after type and range validation.
    ///
    /// On error the stored value is left untouched. When the value changes,
    /// the class first updates dependent properties and then, if the property
    /// is watched, emits its notify signal.
    pub fn set_property(&self, name: &str, value: Property) -> Result<(), ObjectError> {
        if self.0.destroyed.get() {
            return Err(ObjectError::Destroyed { class: self.class_name() });
        }
        let spec = self
            .0
            .class
            .property(name)
            .ok_or_else(|| self.unknown_property(name))?;
        let expected = spec.initial.to_property();
        if std::mem::discriminant(&expected) != std::mem::discriminant(&value) {
            return Err(ObjectError::TypeMismatch {
                class: self.class_name(),
                name: name.to_string(),
                expected: expected.kind(),
            });
        }
        if let Some(check) = spec.check {
            check(self, &value)?;
        }

        let previous = self.0.properties.borrow_mut().insert(spec.name, value.clone());
        if previous.as_ref() == Some(&value) {
            return Ok(());
        }
        if let Some(link) = spec.link {
            link(self)?;
        }
        if let Some(signal) = spec.notify {
            self.emit(signal)?;
        }
        Ok(())
    }

    pub fn child_property(&self, name: &str) -> Option<Property> {
        self.0.child_properties.borrow().get(name).cloned()
    }

    /// Set a placement property declared by the parent's class.
    pub fn set_child_property(&self, name: &str, value: Property) -> Result<(), ObjectError> {
        let parent = self.parent().ok_or(ObjectError::NoParent { class: self.class_name() })?;
        let key = parent
            .0
            .class
            .child_properties
            .iter()
            .copied()
            .find(|k| *k == name)
            .ok_or_else(|| ObjectError::UnknownProperty {
                class: parent.class_name(),
                name: format!("child::{name}"),
            })?;
        self.0.child_properties.borrow_mut().insert(key, value);
        Ok(())
    }

    // ── Containment ───────────────────────────────────────────────────────

    pub fn add(&self, child: &Object) -> Result<(), ObjectError> {
        if let Some(max) = self.0.class.max_children {
            if self.0.children.borrow().len() >= max {
                return Err(ObjectError::TooManyChildren { class: self.class_name(), max });
            }
        }
        if child.parent().is_some() {
            return Err(ObjectError::AlreadyParented { class: child.class_name() });
        }
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    pub fn children(&self) -> Vec<Object> {
        self.0.children.borrow().clone()
    }

    pub fn parent(&self) -> Option<Object> {
        self.0.parent.borrow().upgrade().map(Object)
    }

    // ── Signals ───────────────────────────────────────────────────────────

    pub fn connect(
        &self,
        signal: &str,
        callback: impl Fn(&Object) + 'static,
    ) -> Result<HandlerId, ObjectError> {
        if !self.0.class.has_signal(signal) {
            return Err(self.unknown_signal(signal));
        }
        let id = HandlerId(self.0.next_handler.get());
        self.0.next_handler.set(id.0 + 1);
        self.0.handlers.borrow_mut().push(Handler {
            id,
            signal: signal.to_string(),
            callback: Rc::new(callback),
        });
        Ok(id)
    }

    pub fn disconnect(&self, id: HandlerId) {
        self.0.handlers.borrow_mut().retain(|h| h.id != id);
    }

    /// Run every handler connected to `signal`, in connection order.
    ///
    /// Handlers may connect, disconnect or emit re-entrantly; the handler list
    /// is snapshotted before the first one runs.
    pub fn emit(&self, signal: &str) -> Result<(), ObjectError> {
        if !self.0.class.has_signal(signal) {
            return Err(self.unknown_signal(signal));
        }
        let callbacks: Vec<_> = self
            .0
            .handlers
            .borrow()
            .iter()
            .filter(|h| h.signal == signal)
            .map(|h| h.callback.clone())
            .collect();
        log::trace!("{}::{signal} -> {} handler(s)", self.class_name(), callbacks.len());
        for callback in callbacks {
            callback(self);
        }
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Mark this widget and its descendants visible.
    pub fn show_all(&self) {
        self.0.visible.set(true);
        for child in self.children() {
            child.show_all();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.0.visible.get()
    }

    /// Emit `destroy`, tear down the subtree and detach from the parent.
    /// Destroying twice is a no-op.
    pub fn destroy(&self) {
        if self.0.destroyed.replace(true) {
            return;
        }
        // `destroy` is valid on every class.
        let _ = self.emit("destroy");
        for child in self.0.children.take() {
            *child.0.parent.borrow_mut() = Weak::new();
            child.destroy();
        }
        self.0.handlers.borrow_mut().clear();
        self.0.visible.set(false);
        if let Some(parent) = self.parent() {
            parent.0.children.borrow_mut().retain(|c| !c.ptr_eq(self));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    pub fn is_destroyed(&self) -> bool {
        self.0.destroyed.get()
    }

    fn unknown_property(&self, name: &str) -> ObjectError {
        ObjectError::UnknownProperty { class: self.class_name(), name: name.to_string() }
    }

    fn unknown_signal(&self, name: &str) -> ObjectError {
        ObjectError::UnknownSignal { class: self.class_name(), name: name.to_string() }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class_name())
            .field("children", &self.0.children.borrow().len())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
