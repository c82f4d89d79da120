use tapestry_engine::{Engine, Object, Property};

use crate::error::GuiError;
use crate::value::{InvalidValue, Value};
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{configure, create, native, reader, signal};

/// Drop-down list of strings, optionally with an editable entry.
///
/// Text content lists the items, one per line, and selects the first.
/// `value` reads the selected item (empty when nothing is selected); writing
/// an unknown item appends it before selecting it. The editable variant
/// reads whatever the entry holds and adds an `activate` event fired when
/// the user confirms the entry.
pub struct Combo {
    class: &'static str,
}

impl Combo {
    /// Plain drop-down, registered as `ComboBoxText`.
    pub const TEXT: Self = Self { class: "ComboBoxText" };
    /// Registered as `ComboBoxEntryText`.
    pub const ENTRY: Self = Self { class: "ComboBoxEntry" };

    fn editable(&self) -> bool {
        self.class == Self::ENTRY.class
    }
}

impl WidgetConstructor<Engine> for Combo {
    fn bindings(&self) -> &'static [&'static str] {
        if self.editable() {
            &["content", "value", "changed", "activate"]
        } else {
            &["content", "value", "changed"]
        }
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let combo = create(self.class)?;
        if let Some(text) = cx.attributes.take_text() {
            let items = Value::from(text).to_list().map_err(|e| cx.attributes.invalid("text", e))?;
            let select = !items.is_empty();
            configure(&combo, "items", items)?;
            if select {
                configure(&combo, "active", 0.0)?;
            }
        }

        let content = {
            let combo = combo.clone();
            move |v: Value| set_items(&combo, v.to_list()?)
        };
        let write = {
            let combo = combo.clone();
            move |v: Value| select(&combo, v.into_text())
        };
        let constructed = if self.editable() {
            Constructed::new(combo.clone())
                .set("content", content, None)
                .get_set("value", reader(&combo, "text"), write, None)
                .event("changed", signal(&combo, "changed"))
                .event("activate", signal(&combo, "activate"))
        } else {
            let read = {
                let combo = combo.clone();
                move || selected(&combo).map(Value::from).unwrap_or_default()
            };
            Constructed::new(combo.clone())
                .set("content", content, None)
                .get_set("value", read, write, None)
                .event("changed", signal(&combo, "changed"))
        };
        Ok(constructed)
    }
}

fn items(combo: &Object) -> Vec<String> {
    combo
        .property("items")
        .ok()
        .and_then(|p| p.as_items().map(<[String]>::to_vec))
        .unwrap_or_default()
}

fn selected(combo: &Object) -> Option<String> {
    let active = combo.number("active")?;
    if active < 0.0 {
        return None;
    }
    items(combo).into_iter().nth(active as usize)
}

/// Replace the items, clearing the selection.
fn set_items(combo: &Object, items: Vec<String>) -> Result<(), InvalidValue> {
    native(combo.set_property("active", Property::Number(-1.0)))?;
    native(combo.set_property("items", Property::Items(items)))
}

fn select(combo: &Object, item: String) -> Result<(), InvalidValue> {
    let mut all = items(combo);
    let index = match all.iter().position(|existing| *existing == item) {
        Some(index) => index,
        None => {
            all.push(item);
            native(combo.set_property("items", Property::Items(all.clone())))?;
            all.len() - 1
        }
    };
    native(combo.set_property("active", Property::Number(index as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(items: &[&str]) -> Object {
        filled("ComboBoxText", items)
    }

    fn filled(class: &str, items: &[&str]) -> Object {
        let combo = create(class).unwrap();
        set_items(&combo, items.iter().map(|s| s.to_string()).collect()).unwrap();
        combo
    }

    #[test]
    fn nothing_selected_after_set_items() {
        assert_eq!(selected(&combo(&["a", "b"])), None);
    }

    #[test]
    fn select_existing_item() {
        let combo = combo(&["a", "b"]);
        select(&combo, "b".into()).unwrap();
        assert_eq!(selected(&combo).as_deref(), Some("b"));
        assert_eq!(items(&combo).len(), 2);
    }

    #[test]
    fn select_appends_unknown_item() {
        let combo = combo(&["a"]);
        select(&combo, "z".into()).unwrap();
        assert_eq!(items(&combo), ["a", "z"]);
        assert_eq!(combo.number("active"), Some(1.0));
    }

    #[test]
    fn editable_selection_fills_the_entry() {
        let combo = filled("ComboBoxEntry", &["tea", "coffee"]);
        select(&combo, "coffee".into()).unwrap();
        assert_eq!(combo.text("text").as_deref(), Some("coffee"));
        select(&combo, "cocoa".into()).unwrap();
        assert_eq!(items(&combo), ["tea", "coffee", "cocoa"]);
        assert_eq!(combo.text("text").as_deref(), Some("cocoa"));
    }

    #[test]
    fn only_the_editable_variant_has_activate() {
        assert!(Combo::ENTRY.bindings().contains(&"activate"));
        assert!(!Combo::TEXT.bindings().contains(&"activate"));
    }
}
