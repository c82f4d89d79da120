//! Static class table describing every native widget type.

use crate::error::ObjectError;
use crate::object::Object;
use crate::property::Property;

/// Validation hook run before a property value is stored.
pub type Check = fn(&Object, &Property) -> Result<(), ObjectError>;

/// Keeps dependent properties consistent; runs after a value changed and
/// before its notify signal.
pub type Link = fn(&Object) -> Result<(), ObjectError>;

/// Default value of a property, materialized when an object is created.
#[derive(Debug, Clone, Copy)]
pub enum Initial {
    Text(&'static str),
    Flag(bool),
    Number(f64),
    Items,
}

impl Initial {
    pub fn to_property(self) -> Property {
        match self {
            Self::Text(s) => Property::Text(s.to_string()),
            Self::Flag(b) => Property::Flag(b),
            Self::Number(n) => Property::Number(n),
            Self::Items => Property::Items(Vec::new()),
        }
    }
}

pub struct PropertySpec {
    pub name: &'static str,
    pub initial: Initial,
    /// Signal emitted when the stored value actually changes.
    pub notify: Option<&'static str>,
    pub check: Option<Check>,
    pub link: Option<Link>,
}

pub struct ClassSpec {
    pub name: &'static str,
    pub properties: &'static [PropertySpec],
    /// Class-specific signals; every class also has `destroy`.
    pub signals: &'static [&'static str],
    /// `None` for unlimited children, `Some(0)` for leaf widgets.
    pub max_children: Option<usize>,
    /// Properties this class, as a container, accepts on its children.
    pub child_properties: &'static [&'static str],
}

impl ClassSpec {
    pub fn lookup(name: &str) -> Option<&'static ClassSpec> {
        CLASSES.iter().find(|class| class.name == name)
    }

    pub fn property(&'static self, name: &str) -> Option<&'static PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_signal(&self, name: &str) -> bool {
        name == "destroy" || self.signals.contains(&name)
    }
}

const fn prop(name: &'static str, initial: Initial) -> PropertySpec {
    PropertySpec { name, initial, notify: None, check: None, link: None }
}

const fn watched(
    name: &'static str,
    initial: Initial,
    notify: &'static str,
    check: Option<Check>,
) -> PropertySpec {
    PropertySpec { name, initial, notify: Some(notify), check, link: None }
}

// ── Checks ────────────────────────────────────────────────────────────────

fn within_bounds(obj: &Object, value: &Property) -> Result<(), ObjectError> {
    let Property::Number(v) = value else { return Ok(()) };
    let lower = obj.number("lower").unwrap_or(f64::MIN);
    let upper = obj.number("upper").unwrap_or(f64::MAX);
    if v.is_nan() || *v < lower || *v > upper {
        return Err(out_of_range(obj, "value", *v));
    }
    Ok(())
}

fn item_index(obj: &Object, value: &Property) -> Result<(), ObjectError> {
    let Property::Number(v) = value else { return Ok(()) };
    let len = obj
        .property("items")
        .ok()
        .and_then(|p| p.as_items().map(<[String]>::len))
        .unwrap_or(0);
    index_check(obj, "active", *v, len)
}

fn page_index(obj: &Object, value: &Property) -> Result<(), ObjectError> {
    let Property::Number(v) = value else { return Ok(()) };
    index_check(obj, "page", *v, obj.children().len())
}

fn positive_count(obj: &Object, value: &Property) -> Result<(), ObjectError> {
    match value {
        Property::Number(v) if v.fract() != 0.0 || *v < 1.0 => Err(out_of_range(obj, "columns", *v)),
        _ => Ok(()),
    }
}

fn non_negative(obj: &Object, value: &Property) -> Result<(), ObjectError> {
    match value {
        Property::Number(v) if v.is_nan() || *v < 0.0 => Err(out_of_range(obj, "spacing", *v)),
        _ => Ok(()),
    }
}

/// `-1` means "nothing selected"; anything else must address an existing entry.
fn index_check(obj: &Object, name: &str, v: f64, len: usize) -> Result<(), ObjectError> {
    if v.fract() != 0.0 || v < -1.0 || v >= len as f64 {
        return Err(out_of_range(obj, name, v));
    }
    Ok(())
}

// ── Links ─────────────────────────────────────────────────────────────────

/// Selecting an item copies it into the editable text.
fn show_active(obj: &Object) -> Result<(), ObjectError> {
    match active_item(obj) {
        Some(item) if obj.text("text").as_deref() != Some(item.as_str()) => {
            obj.set_property("text", Property::Text(item))
        }
        _ => Ok(()),
    }
}

/// Editing the text away from the selected item clears the selection.
fn match_text(obj: &Object) -> Result<(), ObjectError> {
    match active_item(obj) {
        Some(item) if obj.text("text").as_deref() != Some(item.as_str()) => {
            obj.set_property("active", Property::Number(-1.0))
        }
        _ => Ok(()),
    }
}

fn active_item(obj: &Object) -> Option<String> {
    let active = obj.number("active").filter(|a| *a >= 0.0)?;
    let items = obj.property("items").ok()?;
    items.as_items()?.get(active as usize).cloned()
}

fn out_of_range(obj: &Object, name: &str, value: f64) -> ObjectError {
    ObjectError::OutOfRange { class: obj.class_name(), name: name.to_string(), value }
}

// ── Class table ───────────────────────────────────────────────────────────

pub static CLASSES: &[ClassSpec] = &[
    ClassSpec {
        name: "Window",
        properties: &[prop("title", Initial::Text(""))],
        signals: &[],
        max_children: Some(1),
        child_properties: &[],
    },
    ClassSpec {
        name: "Box",
        properties: &[
            prop("orientation", Initial::Text("vertical")),
            PropertySpec {
                name: "spacing",
                initial: Initial::Number(0.0),
                notify: None,
                check: Some(non_negative),
                link: None,
            },
        ],
        signals: &[],
        max_children: None,
        child_properties: &["expand", "fill"],
    },
    ClassSpec {
        name: "Notebook",
        properties: &[
            prop("show-tabs", Initial::Flag(true)),
            watched("page", Initial::Number(-1.0), "switch-page", Some(page_index)),
        ],
        signals: &["switch-page"],
        max_children: None,
        child_properties: &["tab-label"],
    },
    ClassSpec {
        name: "Label",
        properties: &[prop("label", Initial::Text(""))],
        signals: &[],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "Button",
        properties: &[prop("label", Initial::Text(""))],
        signals: &["clicked"],
        max_children: Some(1),
        child_properties: &[],
    },
    ClassSpec {
        name: "CheckButton",
        properties: &[
            prop("label", Initial::Text("")),
            watched("active", Initial::Flag(false), "toggled", None),
        ],
        signals: &["toggled"],
        max_children: Some(1),
        child_properties: &[],
    },
    ClassSpec {
        name: "Entry",
        properties: &[watched("text", Initial::Text(""), "changed", None)],
        signals: &["changed", "activate"],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "Frame",
        properties: &[prop("label", Initial::Text(""))],
        signals: &[],
        max_children: Some(1),
        child_properties: &[],
    },
    ClassSpec {
        name: "SpinButton",
        properties: &[
            watched("value", Initial::Number(0.0), "value-changed", Some(within_bounds)),
            prop("lower", Initial::Number(0.0)),
            prop("upper", Initial::Number(100.0)),
            prop("step", Initial::Number(1.0)),
            prop("page", Initial::Number(10.0)),
        ],
        signals: &["value-changed"],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "ComboBoxText",
        properties: &[
            prop("items", Initial::Items),
            watched("active", Initial::Number(-1.0), "changed", Some(item_index)),
        ],
        signals: &["changed"],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "ComboBoxEntry",
        properties: &[
            prop("items", Initial::Items),
            PropertySpec {
                name: "active",
                initial: Initial::Number(-1.0),
                notify: None,
                check: Some(item_index),
                link: Some(show_active),
            },
            PropertySpec {
                name: "text",
                initial: Initial::Text(""),
                notify: Some("changed"),
                check: None,
                link: Some(match_text),
            },
        ],
        signals: &["changed", "activate"],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "Grid",
        properties: &[PropertySpec {
            name: "columns",
            initial: Initial::Number(1.0),
            notify: None,
            check: Some(positive_count),
            link: None,
        }],
        signals: &[],
        max_children: None,
        child_properties: &[
            "left-attach",
            "right-attach",
            "top-attach",
            "bottom-attach",
            "x-options",
            "y-options",
        ],
    },
    ClassSpec {
        name: "FileChooserButton",
        properties: &[
            prop("title", Initial::Text("")),
            watched("filename", Initial::Text(""), "file-set", None),
        ],
        signals: &["file-set"],
        max_children: Some(0),
        child_properties: &[],
    },
    ClassSpec {
        name: "Separator",
        properties: &[prop("orientation", Initial::Text("horizontal"))],
        signals: &[],
        max_children: Some(0),
        child_properties: &[],
    },
];
