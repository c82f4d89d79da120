use std::collections::HashMap;
use std::rc::Rc;

use crate::error::GuiError;
use crate::toolkit::Toolkit;
use crate::widget::{BuildCx, Constructed, FnConstructor, WidgetConstructor};

/// Maps markup tags to widget constructors.
pub struct Registry<T: Toolkit> {
    constructors: HashMap<String, Rc<dyn WidgetConstructor<T>>>,
}

impl<T: Toolkit> Registry<T> {
    /// A registry holding only the toolkit-independent `External` tag.
    pub fn new() -> Self {
        let mut registry = Self { constructors: HashMap::new() };
        registry.register("External", External);
        registry
    }

    /// A registry pre-filled with the toolkit's built-in widgets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        T::register_builtins(&mut registry);
        registry
    }

    /// Register `constructor` under `tag`. A later registration for the same
    /// tag replaces the earlier one.
    pub fn register(&mut self, tag: impl Into<String>, constructor: impl WidgetConstructor<T> + 'static) {
        let tag = tag.into();
        if self.constructors.insert(tag.clone(), Rc::new(constructor)).is_some() {
            log::debug!("constructor for <{tag}> replaced");
        }
    }

    pub fn register_fn<F>(&mut self, tag: impl Into<String>, f: F)
    where
        F: Fn(&mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError> + 'static,
    {
        self.register(tag, FnConstructor(f));
    }

    pub fn lookup(&self, tag: &str) -> Result<Rc<dyn WidgetConstructor<T>>, GuiError> {
        self.constructors
            .get(tag)
            .cloned()
            .ok_or_else(|| GuiError::UnknownWidget { tag: tag.to_string() })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl<T: Toolkit> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// `<External id='...'/>`: splices in a toolkit object the application built.
struct External;

impl<T: Toolkit> WidgetConstructor<T> for External {
    fn construct(&self, cx: &mut BuildCx<'_, T>) -> Result<Constructed<T>, GuiError> {
        let id = cx
            .attributes
            .take("id")
            .ok_or_else(|| GuiError::MalformedTree("<External> needs an `id` attribute".into()))?;
        cx.no_children()?;
        Ok(Constructed::new(cx.take_external(&id)?))
    }
}
