use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::value::Value;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{attach, create, text, writer};

/// Top-level window holding at most one child.
///
/// `title` is set-only and defaults to the application name.
pub struct Window;

impl WidgetConstructor<Engine> for Window {
    fn bindings(&self) -> &'static [&'static str] {
        &["title"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let window = create("Window")?;
        if let Some(child) = cx.single_child()? {
            attach(&window, &child.handle)?;
        }
        let title = Value::from(cx.app_name());
        Ok(Constructed::new(window.clone()).set("title", writer(&window, "title", text), Some(title)))
    }
}
