use tapestry_engine::{Engine, Object, Property};

use crate::error::GuiError;
use crate::value::{InvalidValue, Value};
use crate::widget::{BuildCx, Child, Constructed, WidgetConstructor};

use super::{attach, create, native, pack, placement};

const EDGES: [(&str, &str); 4] = [
    ("left", "left-attach"),
    ("right", "right-attach"),
    ("top", "top-attach"),
    ("bottom", "bottom-attach"),
];

const DEFAULT_OPTIONS: &str = "expand,fill";

/// Grid container.
///
/// Configuration: `columns` (whole number, default 1). Children may carry
/// the cell edges `left`, `right`, `top` and `bottom`, and `x-options` /
/// `y-options` (comma-separated `expand`, `fill`, `shrink`; default
/// `expand,fill`). All of them are settable.
///
/// A child without `left` or `top` takes the cell after the previous child,
/// wrapping to a new row once the previous child reached the last column.
/// A missing `right` or `bottom` spans one cell.
pub struct Table;

impl WidgetConstructor<Engine> for Table {
    fn packing(&self) -> &'static [&'static str] {
        &["left", "right", "top", "bottom", "x-options", "y-options"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        let grid = create("Grid")?;
        let columns = cx.attributes.take_parsed::<u32>("columns")?.unwrap_or(1);
        grid.set_property("columns", Property::Number(f64::from(columns)))
            .map_err(|e| cx.attributes.invalid("columns", e))?;

        let mut cursor = Cell { column: 0, row: 0 };
        for child in cx.take_children() {
            let left = initial_edge(&child, "left")?.unwrap_or(cursor.column);
            let right = initial_edge(&child, "right")?.unwrap_or(left + 1);
            let top = initial_edge(&child, "top")?.unwrap_or(cursor.row);
            let bottom = initial_edge(&child, "bottom")?.unwrap_or(top + 1);
            if right <= left || bottom <= top {
                return Err(GuiError::InvalidAttribute {
                    tag: child.tag().to_string(),
                    attribute: if right <= left { "right" } else { "bottom" }.to_string(),
                    reason: format!("cell {left}..{right} x {top}..{bottom} is empty"),
                });
            }
            cursor = if right >= columns {
                Cell { column: 0, row: top + 1 }
            } else {
                Cell { column: right, row: top }
            };

            attach(&grid, &child.handle)?;
            for ((_, key), at) in EDGES.iter().zip([left, right, top, bottom]) {
                pack(&child.handle, key, f64::from(at))?;
            }
            for (attr, key) in EDGES {
                cx.pack(&child, attr, edge(&child.handle, key), None);
            }
            for key in ["x-options", "y-options"] {
                cx.pack(&child, key, placement(&child.handle, key, options), Some(Value::from(DEFAULT_OPTIONS)));
            }
        }
        Ok(Constructed::new(grid))
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    column: u32,
    row: u32,
}

/// The edge a child asks for in markup, needed before its packing is bound.
fn initial_edge(child: &Child<Engine>, attr: &str) -> Result<Option<u32>, GuiError> {
    child
        .packing_initial(attr)
        .map(|v| {
            cell_index(&v).map_err(|e| GuiError::InvalidAttribute {
                tag: child.tag().to_string(),
                attribute: attr.to_string(),
                reason: e.0,
            })
        })
        .transpose()
}

fn cell_index(v: &Value) -> Result<u32, InvalidValue> {
    let n = v.to_number()?;
    if !n.is_finite() || n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(InvalidValue(format!("`{v}` is not a cell index")));
    }
    Ok(n as u32)
}

/// Writer for one cell edge. The opposite edge must stay on the far side.
fn edge(child: &Object, key: &'static str) -> impl Fn(Value) -> Result<(), InvalidValue> + 'static {
    let child = child.clone();
    let (opposite, leading) = match key {
        "left-attach" => ("right-attach", true),
        "right-attach" => ("left-attach", false),
        "top-attach" => ("bottom-attach", true),
        _ => ("top-attach", false),
    };
    move |v| {
        let at = f64::from(cell_index(&v)?);
        if let Some(other) = child.child_property(opposite).and_then(|p| p.as_number()) {
            if (leading && at >= other) || (!leading && at <= other) {
                return Err(InvalidValue(format!("{key} {at} crosses {opposite} {other}")));
            }
        }
        native(child.set_child_property(key, Property::Number(at)))
    }
}

/// `expand,fill,shrink` in any order and combination, stored normalized.
fn options(v: Value) -> Result<Property, InvalidValue> {
    let raw = v.into_text();
    let mut flags = [("expand", false), ("fill", false), ("shrink", false)];
    for word in raw.split(',').map(str::trim).filter(|w| !w.is_empty()) {
        let flag = flags
            .iter_mut()
            .find(|(name, _)| *name == word)
            .ok_or_else(|| InvalidValue(format!("`{word}` is not one of expand, fill, shrink")))?;
        flag.1 = true;
    }
    let set: Vec<&str> = flags.iter().filter(|(_, on)| *on).map(|(name, _)| *name).collect();
    Ok(Property::Text(set.join(",")))
}
