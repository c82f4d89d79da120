//! Turns an attribute tree into native widgets and namespace entries.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Weak;

use tapestry_markup::AttributeNode;

use crate::error::GuiError;
use crate::gui::{trigger, GuiInner};
use crate::namespace::Namespace;
use crate::registry::Registry;
use crate::toolkit::Toolkit;
use crate::value::Value;
use crate::variable::Template;
use crate::widget::{Attributes, BuildCx, Child, Packed};

// ── BindingRequest ────────────────────────────────────────────────────────

/// A binding attribute as written in markup: `name` or `name:initial`.
///
/// An empty name (`':initial'`) applies the initial value without exposing
/// a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRequest {
    pub name: String,
    pub initial: Option<String>,
}

impl BindingRequest {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((name, initial)) => Self { name: name.to_string(), initial: Some(initial.to_string()) },
            None => Self { name: raw.to_string(), initial: None },
        }
    }
}

// ── Instantiator ──────────────────────────────────────────────────────────

/// Post-order walk over the attribute tree: children are built before their
/// parent, so a constructor always receives finished child handles.
pub(crate) struct Instantiator<'a, T: Toolkit> {
    pub(crate) registry: &'a Registry<T>,
    pub(crate) toolkit: &'a T,
    pub(crate) namespace: &'a Namespace<T>,
    pub(crate) gui: Weak<GuiInner<T>>,
    pub(crate) app_name: &'a str,
    pub(crate) externals: RefCell<HashMap<String, T::Handle>>,
    next_owner: Cell<usize>,
}

impl<'a, T: Toolkit> Instantiator<'a, T> {
    pub(crate) fn new(
        registry: &'a Registry<T>,
        toolkit: &'a T,
        namespace: &'a Namespace<T>,
        gui: Weak<GuiInner<T>>,
        app_name: &'a str,
        externals: HashMap<String, T::Handle>,
    ) -> Self {
        Self {
            registry,
            toolkit,
            namespace,
            gui,
            app_name,
            externals: RefCell::new(externals),
            next_owner: Cell::new(0),
        }
    }

    pub(crate) fn build(&self, root: AttributeNode) -> Result<T::Handle, GuiError> {
        let child = self.build_node(root, &[])?;
        let mut unused: Vec<String> = self.externals.borrow().keys().cloned().collect();
        if !unused.is_empty() {
            unused.sort();
            log::warn!("supplied objects never placed: {}", unused.join(", "));
        }
        Ok(child.handle)
    }

    fn build_node(&self, node: AttributeNode, packing_keys: &[&str]) -> Result<Child<T>, GuiError> {
        let AttributeNode { tag, mut attributes, children, text } = node;
        let constructor = self.registry.lookup(&tag)?;

        // Attributes addressed to the parent travel with the child.
        let packing: BTreeMap<String, BindingRequest> = packing_keys
            .iter()
            .filter_map(|key| attributes.remove(*key).map(|raw| (key.to_string(), BindingRequest::parse(&raw))))
            .collect();

        let children = children
            .into_iter()
            .map(|child| self.build_node(child, constructor.packing()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut pending: BTreeMap<usize, (String, BTreeMap<String, BindingRequest>)> = children
            .iter()
            .map(|child| (child.owner, (child.tag.clone(), child.packing.clone())))
            .collect();

        let mut requests: BTreeMap<String, BindingRequest> = constructor
            .bindings()
            .iter()
            .filter_map(|attr| attributes.remove(*attr).map(|raw| (attr.to_string(), BindingRequest::parse(&raw))))
            .collect();

        let mut cx = BuildCx {
            toolkit: self.toolkit,
            attributes: Attributes::new(tag.clone(), attributes, text),
            children,
            app_name: self.app_name,
            data: self.namespace.data(),
            externals: &self.externals,
            bound: &requests,
            packed: Vec::new(),
        };
        let constructed = constructor.construct(&mut cx)?;
        let BuildCx { attributes, children, packed, .. } = cx;
        if !children.is_empty() {
            return Err(GuiError::MalformedTree(format!("<{tag}> takes no child widgets")));
        }
        attributes.finish()?;

        // Children's placement first, so the container's own initial values
        // (a notebook page, say) are applied last.
        for Packed { owner, attr, template } in packed {
            let Some((child_tag, child_requests)) = pending.get_mut(&owner) else {
                log::warn!("<{tag}> packed `{attr}` on a widget that is not its child");
                continue;
            };
            let request = child_requests.remove(&attr);
            self.bind(owner, child_tag, &attr, template, request)?;
        }
        if let Some((child_tag, left)) = pending.into_values().find(|(_, left)| !left.is_empty()) {
            return Err(GuiError::UnusedAttributes { tag: child_tag, attributes: left.into_keys().collect() });
        }

        let owner = self.next_owner.get();
        self.next_owner.set(owner + 1);
        for (attr, template) in constructed.templates {
            let request = requests.remove(&attr);
            self.bind(owner, &tag, &attr, template, request)?;
        }
        if !requests.is_empty() {
            return Err(GuiError::UnusedAttributes { tag, attributes: requests.into_keys().collect() });
        }

        log::trace!("built <{tag}>");
        Ok(Child { handle: constructed.handle, owner, tag, packing })
    }

    fn bind(
        &self,
        owner: usize,
        tag: &str,
        attr: &str,
        template: Template,
        request: Option<BindingRequest>,
    ) -> Result<(), GuiError> {
        let invalid = |reason: &str| GuiError::InvalidAttribute {
            tag: tag.to_string(),
            attribute: attr.to_string(),
            reason: reason.to_string(),
        };
        let (name, initial) = match request {
            Some(BindingRequest { name, initial }) => (name, initial.map(Value::from)),
            None => (String::new(), None),
        };

        match template {
            Template::Get(reader) => {
                if initial.is_some() {
                    return Err(invalid("a read-only binding takes no initial value"));
                }
                if !name.is_empty() {
                    self.namespace.declare_get(owner, &name, reader)?;
                }
            }
            Template::Set { writer, default } => {
                if let Some(value) = initial.or(default) {
                    writer(value).map_err(|e| invalid(&e.0))?;
                }
                if !name.is_empty() {
                    self.namespace.declare_set(owner, &name, writer)?;
                }
            }
            Template::GetSet { reader, writer, default } => {
                if let Some(value) = initial.or(default) {
                    writer(value).map_err(|e| invalid(&e.0))?;
                }
                if !name.is_empty() {
                    self.namespace.declare_get(owner, &name, reader)?;
                    self.namespace.declare_set(owner, &name, writer)?;
                }
            }
            Template::Event(registrar) => {
                if initial.is_some() {
                    return Err(invalid("an event binding takes no initial value"));
                }
                if name.is_empty() {
                    return Ok(());
                }
                let slot = self.namespace.declare_event(&name)?;
                registrar(trigger(self.gui.clone(), name, slot));
            }
            Template::Data { default } => {
                if !name.is_empty() {
                    let value = initial.or(default).unwrap_or_default();
                    self.namespace.declare_data(&name, value)?;
                }
            }
        }
        Ok(())
    }
}
