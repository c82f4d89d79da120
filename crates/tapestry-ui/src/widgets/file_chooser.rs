use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{create, reader, signal, text, writer};

/// Button opening a file dialog.
///
/// `title` names the dialog; `value` reads the chosen path, empty until the
/// user picks one. `chosen` fires after each pick.
pub struct FileChooserButton;

impl WidgetConstructor<Engine> for FileChooserButton {
    fn bindings(&self) -> &'static [&'static str] {
        &["title", "value", "chosen"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let chooser = create("FileChooserButton")?;
        Ok(Constructed::new(chooser.clone())
            .set("title", writer(&chooser, "title", text), None)
            .get("value", reader(&chooser, "filename"))
            .event("chosen", signal(&chooser, "file-set")))
    }
}
