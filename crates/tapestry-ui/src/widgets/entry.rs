use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{create, reader, signal, text, writer};

/// Single-line text input.
///
/// `value` reads and writes the text; `changed` fires on every edit,
/// `activate` when the user confirms.
pub struct Entry;

impl WidgetConstructor<Engine> for Entry {
    fn bindings(&self) -> &'static [&'static str] {
        &["value", "changed", "activate"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let entry = create("Entry")?;
        Ok(Constructed::new(entry.clone())
            .get_set("value", reader(&entry, "text"), writer(&entry, "text", text), None)
            .event("changed", signal(&entry, "changed"))
            .event("activate", signal(&entry, "activate")))
    }
}
