use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::value::Value;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{create, text, writer};

/// Static text. Text content is the initial label.
pub struct Label;

impl WidgetConstructor<Engine> for Label {
    fn bindings(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let label = create("Label")?;
        let initial = cx.attributes.take_text().map(Value::from);
        Ok(Constructed::new(label.clone()).set("value", writer(&label, "label", text), initial))
    }
}
