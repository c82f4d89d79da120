use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

use crate::builder::BindingRequest;
use crate::error::GuiError;
use crate::toolkit::Toolkit;
use crate::value::{InvalidValue, Value};
use crate::variable::{DataStore, Template, Trigger};

// ── WidgetConstructor trait ───────────────────────────────────────────────

/// Builds one native widget from a markup element.
///
/// Built-in widgets and application widgets implement the same trait and
/// live side by side in a [`Registry`](crate::registry::Registry).
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// struct Counter;
///
/// impl WidgetConstructor<Engine> for Counter {
///     fn bindings(&self) -> &'static [&'static str] { &["count", "store"] }
///
///     fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
///         let label = cx.toolkit.create("Label").map_err(GuiError::toolkit)?;
///         let store = cx.data().clone();
///         Ok(Constructed::new(label)
///             .data("store", None)
///             .get("count", move || store.get("clicks").unwrap_or_default()))
///     }
/// }
/// ```
pub trait WidgetConstructor<T: Toolkit> {
    /// Attributes interpreted as variable bindings rather than configuration.
    fn bindings(&self) -> &'static [&'static str] {
        &[]
    }

    /// Attributes this widget's children may carry to configure their placement.
    ///
    /// They use binding syntax on the child (`expand='e:False'`) and are
    /// declared with [`BuildCx::pack`].
    fn packing(&self) -> &'static [&'static str] {
        &[]
    }

    /// Create the native widget and declare its variables.
    ///
    /// Children are already built. Configuration attributes and text the
    /// constructor does not take from `cx.attributes` are reported as errors.
    fn construct(&self, cx: &mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError>;
}

/// Adapts a closure into a constructor without binding attributes.
pub struct FnConstructor<F>(pub F);

impl<T, F> WidgetConstructor<T> for FnConstructor<F>
where
    T: Toolkit,
    F: Fn(&mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError>,
{
    fn construct(&self, cx: &mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError> {
        (self.0)(cx)
    }
}

// ── Attributes ────────────────────────────────────────────────────────────

/// Configuration attributes and text content of one element.
///
/// Constructors `take` what they understand; whatever is left afterwards
/// makes the build fail.
#[derive(Debug, Clone)]
pub struct Attributes {
    tag: String,
    values: BTreeMap<String, String>,
    text: Option<String>,
}

impl Attributes {
    pub(crate) fn new(tag: impl Into<String>, values: BTreeMap<String, String>, text: Option<String>) -> Self {
        Self { tag: tag.into(), values, text }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn take_bool(&mut self, key: &str) -> Result<Option<bool>, GuiError> {
        self.take(key)
            .map(|raw| Value::from(raw).to_bool().map_err(|e| self.invalid(key, e)))
            .transpose()
    }

    pub fn take_parsed<F>(&mut self, key: &str) -> Result<Option<F>, GuiError>
    where
        F: FromStr,
        F::Err: Display,
    {
        self.take(key)
            .map(|raw| raw.trim().parse::<F>().map_err(|e| self.invalid(key, e)))
            .transpose()
    }

    pub fn take_text(&mut self) -> Option<String> {
        self.text.take()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.text.is_none()
    }

    /// An `InvalidAttribute` error for `key` on this element.
    pub fn invalid(&self, key: &str, reason: impl Display) -> GuiError {
        GuiError::InvalidAttribute {
            tag: self.tag.clone(),
            attribute: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn finish(self) -> Result<(), GuiError> {
        if self.is_empty() {
            return Ok(());
        }
        let mut attributes: Vec<String> = self.values.into_keys().collect();
        if self.text.is_some() {
            attributes.push("text content".to_string());
        }
        Err(GuiError::UnusedAttributes { tag: self.tag, attributes })
    }
}

// ── Child ─────────────────────────────────────────────────────────────────

/// An already-built child widget, with the packing bindings it carries for
/// its parent.
pub struct Child<T: Toolkit> {
    pub handle: T::Handle,
    pub(crate) owner: usize,
    pub(crate) tag: String,
    pub(crate) packing: BTreeMap<String, BindingRequest>,
}

impl<T: Toolkit> Child<T> {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The initial value written for packing attribute `attr`, if any.
    ///
    /// Lets a container lay children out before the packing variables are
    /// bound; the same value is written again through the declared writer.
    pub fn packing_initial(&self, attr: &str) -> Option<Value> {
        self.packing.get(attr)?.initial.clone().map(Value::from)
    }
}

/// A packing variable declared by a container on one of its children.
pub(crate) struct Packed {
    pub(crate) owner: usize,
    pub(crate) attr: String,
    pub(crate) template: Template,
}

// ── BuildCx ───────────────────────────────────────────────────────────────

/// What a constructor gets to work with.
pub struct BuildCx<'a, T: Toolkit> {
    pub toolkit: &'a T,
    pub attributes: Attributes,
    pub children: Vec<Child<T>>,
    pub(crate) app_name: &'a str,
    pub(crate) data: &'a DataStore,
    pub(crate) externals: &'a RefCell<HashMap<String, T::Handle>>,
    pub(crate) bound: &'a BTreeMap<String, BindingRequest>,
    pub(crate) packed: Vec<Packed>,
}

impl<'a, T: Toolkit> BuildCx<'a, T> {
    pub fn tag(&self) -> &str {
        self.attributes.tag()
    }

    /// Application name; the default window title.
    pub fn app_name(&self) -> &str {
        self.app_name
    }

    /// The shared data cells of the GUI being built.
    pub fn data(&self) -> &DataStore {
        self.data
    }

    /// The variable name requested through binding attribute `attr`, if any.
    pub fn bound_name(&self, attr: &str) -> Option<&str> {
        self.bound
            .get(attr)
            .map(|request| request.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Claim the toolkit object supplied under `id`.
    pub fn take_external(&self, id: &str) -> Result<T::Handle, GuiError> {
        self.externals
            .borrow_mut()
            .remove(id)
            .ok_or_else(|| GuiError::UnknownExternal { id: id.to_string() })
    }

    pub fn take_children(&mut self) -> Vec<Child<T>> {
        std::mem::take(&mut self.children)
    }

    /// Take the only child, if there is one. More than one is a malformed tree.
    pub fn single_child(&mut self) -> Result<Option<Child<T>>, GuiError> {
        if self.children.len() > 1 {
            return Err(GuiError::MalformedTree(format!(
                "<{}> takes one child widget, found {}",
                self.tag(),
                self.children.len()
            )));
        }
        Ok(self.children.pop())
    }

    /// Declare packing attribute `attr` of `child` as a set variable owned by
    /// the child.
    ///
    /// The writer runs once the container is built, so it may assume the
    /// child is already attached. `default` is written when the child does
    /// not carry `attr`.
    pub fn pack(
        &mut self,
        child: &Child<T>,
        attr: &str,
        writer: impl Fn(Value) -> Result<(), InvalidValue> + 'static,
        default: Option<Value>,
    ) {
        self.packed.push(Packed {
            owner: child.owner,
            attr: attr.to_string(),
            template: Template::Set { writer: Rc::new(writer), default },
        });
    }

    pub fn no_children(&self) -> Result<(), GuiError> {
        if self.children.is_empty() {
            Ok(())
        } else {
            Err(GuiError::MalformedTree(format!("<{}> takes no child widgets", self.tag())))
        }
    }
}

// ── Constructed ───────────────────────────────────────────────────────────

/// A constructor's result: the native handle plus variable templates keyed
/// by binding attribute. Templates are bound in declaration order, so
/// initial values are applied in that order too.
pub struct Constructed<T: Toolkit> {
    pub handle: T::Handle,
    pub(crate) templates: Vec<(String, Template)>,
}

impl<T: Toolkit> Constructed<T> {
    pub fn new(handle: T::Handle) -> Self {
        Self { handle, templates: Vec::new() }
    }

    pub fn template(mut self, attr: impl Into<String>, template: Template) -> Self {
        self.templates.push((attr.into(), template));
        self
    }

    pub fn get(self, attr: impl Into<String>, reader: impl Fn() -> Value + 'static) -> Self {
        self.template(attr, Template::Get(Rc::new(reader)))
    }

    /// `default` is written when the element does not carry `attr`.
    pub fn set(
        self,
        attr: impl Into<String>,
        writer: impl Fn(Value) -> Result<(), InvalidValue> + 'static,
        default: Option<Value>,
    ) -> Self {
        self.template(attr, Template::Set { writer: Rc::new(writer), default })
    }

    pub fn get_set(
        self,
        attr: impl Into<String>,
        reader: impl Fn() -> Value + 'static,
        writer: impl Fn(Value) -> Result<(), InvalidValue> + 'static,
        default: Option<Value>,
    ) -> Self {
        self.template(
            attr,
            Template::GetSet { reader: Rc::new(reader), writer: Rc::new(writer), default },
        )
    }

    pub fn event(self, attr: impl Into<String>, registrar: impl FnOnce(Trigger) + 'static) -> Self {
        self.template(attr, Template::Event(Box::new(registrar)))
    }

    pub fn data(self, attr: impl Into<String>, default: Option<Value>) -> Self {
        self.template(attr, Template::Data { default })
    }
}
