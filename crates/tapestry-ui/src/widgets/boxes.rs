use tapestry_engine::{Engine, Property};

use crate::error::GuiError;
use crate::value::Value;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{attach, configure, create, flag, placement};

/// `VBox` / `HBox`: a linear container.
///
/// Configuration: `spacing` (non-negative number). Children may carry
/// `expand` and `fill`, both settable and defaulting to `True`.
pub struct Boxed {
    orientation: &'static str,
}

impl Boxed {
    pub const VERTICAL: Self = Self { orientation: "vertical" };
    pub const HORIZONTAL: Self = Self { orientation: "horizontal" };
}

impl WidgetConstructor<Engine> for Boxed {
    fn packing(&self) -> &'static [&'static str] {
        &["expand", "fill"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let container = create("Box")?;
        configure(&container, "orientation", self.orientation)?;
        if let Some(spacing) = cx.attributes.take_parsed::<f64>("spacing")? {
            container
                .set_property("spacing", Property::Number(spacing))
                .map_err(|e| cx.attributes.invalid("spacing", e))?;
        }

        for child in cx.take_children() {
            attach(&container, &child.handle)?;
            for key in ["expand", "fill"] {
                cx.pack(&child, key, placement(&child.handle, key, flag), Some(Value::Bool(true)));
            }
        }
        Ok(Constructed::new(container))
    }
}

