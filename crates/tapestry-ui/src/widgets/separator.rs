use tapestry_engine::Engine;

use crate::error::GuiError;
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{configure, create};

pub struct Separator {
    orientation: &'static str,
}

impl Separator {
    pub const HORIZONTAL: Self = Self { orientation: "horizontal" };
    pub const VERTICAL: Self = Self { orientation: "vertical" };
}

impl WidgetConstructor<Engine> for Separator {
    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let separator = create("Separator")?;
        configure(&separator, "orientation", self.orientation)?;
        Ok(Constructed::new(separator))
    }
}
