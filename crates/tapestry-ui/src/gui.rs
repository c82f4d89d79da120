use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use tapestry_markup::{parse_bytes, parse_str, AttributeNode};

use crate::builder::Instantiator;
use crate::error::GuiError;
use crate::namespace::Namespace;
use crate::registry::Registry;
use crate::run::LoopStack;
use crate::toolkit::Toolkit;
use crate::value::Value;
use crate::variable::{Callback, DataStore, EventSlot, Trigger, VariableKind};
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

const DOCUMENT_TAG: &str = "gui";
const SETTING_TAG: &str = "Setting";

pub(crate) struct GuiInner<T: Toolkit> {
    toolkit: T,
    name: String,
    namespace: Namespace<T>,
    loops: LoopStack,
    root: OnceCell<T::Handle>,
    settings: BTreeMap<String, String>,
}

// ── Gui ───────────────────────────────────────────────────────────────────

/// A live GUI: the widget tree built from markup plus its variable namespace.
///
/// Cloning is cheap and yields another handle to the same GUI; this is what
/// event callbacks receive.
///
/// ```rust,ignore
/// let gui = Gui::builder(Engine::new())
///     .markup("<Window><Entry value='name:Ada' activate='greet'/></Window>")
///     .event("greet", |gui| println!("hello {}", gui.get("name").unwrap()))
///     .build()?;
/// gui.run(true)?;
/// ```
pub struct Gui<T: Toolkit>(pub(crate) Rc<GuiInner<T>>);

impl<T: Toolkit> Clone for Gui<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Toolkit> fmt::Debug for Gui<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gui")
            .field("name", &self.0.name)
            .field("variables", &self.names())
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

impl<T: Toolkit> Gui<T> {
    pub fn builder(toolkit: T) -> GuiBuilder<T> {
        GuiBuilder::new(toolkit)
    }

    /// Build from a markup string with the toolkit's built-in widgets only.
    pub fn new(toolkit: T, markup: &str) -> Result<Self, GuiError> {
        Self::builder(toolkit).markup(markup).build()
    }

    // ── Variables ─────────────────────────────────────────────────────────

    pub fn get(&self, name: &str) -> Result<Value, GuiError> {
        self.0.namespace.get(name)
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), GuiError> {
        self.0.namespace.set(name, value.into())
    }

    /// Install the callback for event `name`, replacing any earlier one.
    pub fn on(&self, name: &str, callback: impl Fn(&Gui<T>) + 'static) -> Result<(), GuiError> {
        self.0.namespace.on(name, Rc::new(callback))
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.0.namespace.names()
    }

    pub fn variables(&self) -> Vec<(String, Vec<VariableKind>)> {
        self.0.namespace.variables()
    }

    pub fn data(&self) -> &DataStore {
        self.0.namespace.data()
    }

    // ── Loop control ──────────────────────────────────────────────────────

    /// `run(true)` shows the root and blocks in a new loop frame until that
    /// frame is stopped. `run(false)` stops the innermost frame.
    pub fn run(&self, start: bool) -> Result<(), GuiError> {
        if start { self.enter() } else { self.leave() }
    }

    /// Number of active loop frames.
    pub fn depth(&self) -> usize {
        self.0.loops.depth()
    }

    fn enter(&self) -> Result<(), GuiError> {
        let frame = self.0.loops.push();
        if let Some(root) = self.0.root.get() {
            self.0.toolkit.show(root);
        }
        log::debug!("{}: entering loop, depth {}", self.0.name, self.depth());

        let result = self.0.toolkit.run_loop();
        let unrequested = self.0.loops.discard(frame);
        match result {
            Ok(()) => {
                if unrequested {
                    log::warn!("{}: native loop returned without a stop request", self.0.name);
                }
                log::debug!("{}: left loop, depth {}", self.0.name, self.depth());
                Ok(())
            }
            Err(e) => Err(GuiError::toolkit(e)),
        }
    }

    fn leave(&self) -> Result<(), GuiError> {
        self.0.loops.pop().ok_or(GuiError::NoActiveLoop)?;
        self.0.toolkit.quit_loop();
        Ok(())
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Application name; defaults to the executable's file name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// A `<Setting name=.. value=..>` from the document element.
    pub fn setting(&self, name: &str) -> Option<&str> {
        self.0.settings.get(name).map(String::as_str)
    }

    pub fn settings(&self) -> &BTreeMap<String, String> {
        &self.0.settings
    }

    /// The root widget. Always present once `build` has returned.
    pub fn root(&self) -> Option<&T::Handle> {
        self.0.root.get()
    }

    pub fn toolkit(&self) -> &T {
        &self.0.toolkit
    }
}

/// Wire an event slot to a native signal without keeping the GUI alive.
pub(crate) fn trigger<T: Toolkit>(gui: Weak<GuiInner<T>>, name: String, slot: EventSlot<T>) -> Trigger {
    Rc::new(move || {
        let Some(inner) = gui.upgrade() else { return };
        // Clone out so the callback may replace itself.
        let callback = slot.borrow().clone();
        match callback {
            Some(callback) => {
                log::trace!("event `{name}`");
                callback(&Gui(inner));
            }
            None => log::trace!("event `{name}` has no callback"),
        }
    })
}

// ── GuiBuilder ────────────────────────────────────────────────────────────

enum Source {
    Markup(String),
    File(PathBuf),
}

/// Configures and builds a [`Gui`].
///
/// Without `.markup` or `.file`, `<name>.gui` is read from the working
/// directory.
pub struct GuiBuilder<T: Toolkit> {
    toolkit: T,
    name: Option<String>,
    source: Option<Source>,
    registry: Registry<T>,
    events: Vec<(String, Callback<T>)>,
    objects: HashMap<String, T::Handle>,
    data: Vec<(String, Value)>,
}

impl<T: Toolkit> GuiBuilder<T> {
    pub fn new(toolkit: T) -> Self {
        Self {
            toolkit,
            name: None,
            source: None,
            registry: Registry::with_builtins(),
            events: Vec::new(),
            objects: HashMap::new(),
            data: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn markup(mut self, src: impl Into<String>) -> Self {
        self.source = Some(Source::Markup(src.into()));
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(Source::File(path.into()));
        self
    }

    /// Register a callback, exactly as [`Gui::on`] would after construction.
    pub fn event(mut self, name: impl Into<String>, callback: impl Fn(&Gui<T>) + 'static) -> Self {
        self.events.push((name.into(), Rc::new(callback)));
        self
    }

    pub fn widget(mut self, tag: impl Into<String>, constructor: impl WidgetConstructor<T> + 'static) -> Self {
        self.registry.register(tag, constructor);
        self
    }

    pub fn widget_fn<F>(mut self, tag: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError> + 'static,
    {
        self.registry.register_fn(tag, f);
        self
    }

    /// Supply a toolkit object for `<External id='..'/>`.
    pub fn object(mut self, id: impl Into<String>, handle: T::Handle) -> Self {
        self.objects.insert(id.into(), handle);
        self
    }

    /// Declare data cell `name` before the markup is built.
    pub fn data(mut self, name: impl Into<String>, initial: impl Into<Value>) -> Self {
        self.data.push((name.into(), initial.into()));
        self
    }

    pub fn build(self) -> Result<Gui<T>, GuiError> {
        let Self { toolkit, name, source, registry, events, objects, data } = self;
        let name = name.unwrap_or_else(default_name);
        let tree = match source {
            Some(Source::Markup(src)) => parse_str(&src)?,
            Some(Source::File(path)) => load(path)?,
            None => load(PathBuf::from(format!("{name}.gui")))?,
        };
        let (settings, root_node) = split_document(tree)?;

        let inner = Rc::new(GuiInner {
            toolkit,
            name,
            namespace: Namespace::new(),
            loops: LoopStack::default(),
            root: OnceCell::new(),
            settings,
        });
        for (cell, initial) in data {
            inner.namespace.declare_data(&cell, initial)?;
        }

        let root = Instantiator::new(
            &registry,
            &inner.toolkit,
            &inner.namespace,
            Rc::downgrade(&inner),
            &inner.name,
            objects,
        )
        .build(root_node)?;

        let weak = Rc::downgrade(&inner);
        inner.toolkit.on_destroy(
            &root,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else { return };
                let gui = Gui(inner);
                if gui.depth() > 0 {
                    log::debug!("{}: root destroyed, stopping innermost loop", gui.name());
                    if let Err(e) = gui.run(false) {
                        log::warn!("{}: {e}", gui.name());
                    }
                }
            }),
        );
        // Freshly created cell; cannot already be set.
        let _ = inner.root.set(root);

        let gui = Gui(inner);
        for (event, callback) in events {
            gui.0.namespace.on(&event, callback)?;
        }
        log::info!("{}: built with {} variable(s)", gui.name(), gui.names().len());
        Ok(gui)
    }
}

fn default_name() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "tapestry".to_string())
}

fn load(path: PathBuf) -> Result<AttributeNode, GuiError> {
    log::debug!("loading markup from {}", path.display());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(parse_bytes(&bytes)?),
        Err(source) => Err(GuiError::Io { path, source }),
    }
}

/// Peel the optional `<gui>` document element: settings plus the single root widget.
fn split_document(tree: AttributeNode) -> Result<(BTreeMap<String, String>, AttributeNode), GuiError> {
    if tree.tag != DOCUMENT_TAG {
        return Ok((BTreeMap::new(), tree));
    }
    if !tree.attributes.is_empty() || tree.text.is_some() {
        return Err(GuiError::MalformedTree(format!(
            "<{DOCUMENT_TAG}> takes no attributes or text"
        )));
    }

    let mut settings = BTreeMap::new();
    let mut widgets = Vec::new();
    for child in tree.children {
        if child.tag != SETTING_TAG {
            widgets.push(child);
            continue;
        }
        let (Some(name), Some(value)) = (child.attr("name"), child.attr("value")) else {
            return Err(GuiError::MalformedTree(format!(
                "<{SETTING_TAG}> needs `name` and `value` attributes"
            )));
        };
        settings.insert(name.to_string(), value.to_string());
    }

    match widgets.len() {
        1 => Ok((settings, widgets.remove(0))),
        n => Err(GuiError::MalformedTree(format!(
            "<{DOCUMENT_TAG}> must hold exactly one top-level widget, found {n}"
        ))),
    }
}
