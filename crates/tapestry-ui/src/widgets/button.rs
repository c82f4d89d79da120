use tapestry_engine::{Engine, Object};

use crate::error::GuiError;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{attach, configure, create, flag, reader, signal, writer};

pub struct Button;

pub struct CheckButton;

/// A child widget, or else text content, becomes the caption.
fn caption(cx: &mut BuildCx<'_, Engine>, button: &Object) -> Result<(), GuiError> {
    if let Some(child) = cx.single_child()? {
        attach(button, &child.handle)?;
    } else if let Some(caption) = cx.attributes.take_text() {
        configure(button, "label", caption)?;
    }
    Ok(())
}

impl WidgetConstructor<Engine> for Button {
    fn bindings(&self) -> &'static [&'static str] {
        &["clicked"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let button = create("Button")?;
        caption(cx, &button)?;
        Ok(Constructed::new(button.clone()).event("clicked", signal(&button, "clicked")))
    }
}

impl WidgetConstructor<Engine> for CheckButton {
    fn bindings(&self) -> &'static [&'static str] {
        &["value", "toggled"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let check = create("CheckButton")?;
        caption(cx, &check)?;
        Ok(Constructed::new(check.clone())
            .get_set("value", reader(&check, "active"), writer(&check, "active", flag), None)
            .event("toggled", signal(&check, "toggled")))
    }
}
