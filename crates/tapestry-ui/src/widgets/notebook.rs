use tapestry_engine::{Engine, Object, Property};

use crate::error::GuiError;
use crate::value::{InvalidValue, Value};
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{attach, configure, create, flag, native, number, placement, reader, signal, text, writer};

/// Tabbed container.
///
/// Children may carry `tab_label` and `current_page`; both are settable.
/// Writing a true `current_page` brings that page to the front. Without one
/// the first page is shown.
pub struct Notebook;

impl WidgetConstructor<Engine> for Notebook {
    fn bindings(&self) -> &'static [&'static str] {
        &["show_tabs", "page", "switched"]
    }

    fn packing(&self) -> &'static [&'static str] {
        &["tab_label", "current_page"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let notebook = create("Notebook")?;
        for child in cx.take_children() {
            attach(&notebook, &child.handle)?;
            cx.pack(&child, "tab_label", placement(&child.handle, "tab-label", text), None);
            cx.pack(&child, "current_page", bring_forward(&notebook, &child.handle), None);
        }
        if !notebook.children().is_empty() {
            configure(&notebook, "page", 0.0)?;
        }

        Ok(Constructed::new(notebook.clone())
            .set("show_tabs", writer(&notebook, "show-tabs", flag), None)
            .get_set("page", reader(&notebook, "page"), writer(&notebook, "page", number), None)
            .event("switched", signal(&notebook, "switch-page")))
    }
}

fn bring_forward(notebook: &Object, page: &Object) -> impl Fn(Value) -> Result<(), InvalidValue> + 'static {
    let notebook = notebook.clone();
    let page = page.clone();
    move |v| {
        if !v.to_bool()? {
            return Ok(());
        }
        let index = notebook
            .children()
            .iter()
            .position(|p| p.ptr_eq(&page))
            .ok_or_else(|| InvalidValue::new("page is no longer in its notebook"))?;
        native(notebook.set_property("page", Property::Number(index as f64)))
    }
}
