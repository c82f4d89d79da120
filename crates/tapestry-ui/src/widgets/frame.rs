use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{attach, create, text, writer};

pub struct Frame;

impl WidgetConstructor<Engine> for Frame {
    fn bindings(&self) -> &'static [&'static str] {
        &["label"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let frame = create("Frame")?;
        if let Some(child) = cx.single_child()? {
            attach(&frame, &child.handle)?;
        }
        Ok(Constructed::new(frame.clone()).set("label", writer(&frame, "label", text), None))
    }
}
