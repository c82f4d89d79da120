use tapestry_engine::{Engine, Object, Property};

use crate::error::GuiError;
use crate::value::{InvalidValue, Value};
use crate::widget::{BuildCx, Constructed, WidgetConstructor};

use super::{create, native, number, reader, signal, writer};

/// Numeric input bounded by a range.
///
/// `range` takes `min,max` and clamps the current value into it;
/// `increment` takes `step` or `step,page`. Writing a `value` outside the
/// range is refused.
pub struct SpinButton;

impl WidgetConstructor<Engine> for SpinButton {
    fn bindings(&self) -> &'static [&'static str] {
        &["range", "increment", "value", "changed"]
    }

    fn construct(&self, cx: &mut BuildCx<'_, Engine>) -> Result<Constructed<Engine>, GuiError> {
        cx.no_children()?;
        let spin = create("SpinButton")?;

        let range = {
            let spin = spin.clone();
            move |v: Value| set_range(&spin, &v)
        };
        let increment = {
            let spin = spin.clone();
            move |v: Value| set_increment(&spin, &v)
        };

        // Range before value, so an initial value is checked against it.
        Ok(Constructed::new(spin.clone())
            .set("range", range, None)
            .set("increment", increment, None)
            .get_set("value", reader(&spin, "value"), writer(&spin, "value", number), None)
            .event("changed", signal(&spin, "value-changed")))
    }
}

fn numbers(v: &Value) -> Result<Vec<f64>, InvalidValue> {
    if let Value::Number(n) = v {
        return Ok(vec![*n]);
    }
    v.clone()
        .into_text()
        .split(',')
        .map(|part| Value::from(part).to_number())
        .collect()
}

fn set_range(spin: &Object, v: &Value) -> Result<(), InvalidValue> {
    let [lower, upper] = numbers(v)?[..] else {
        return Err(InvalidValue(format!("range `{v}` is not `min,max`")));
    };
    if !lower.is_finite() || !upper.is_finite() {
        return Err(InvalidValue(format!("range {lower},{upper} has a non-finite bound")));
    }
    if lower > upper {
        return Err(InvalidValue(format!("range {lower},{upper} is empty")));
    }
    // Clamp first so the value never sits outside the stored bounds.
    let current = spin.number("value").unwrap_or(lower).clamp(lower, upper);
    native(spin.set_property("lower", Property::Number(f64::MIN)))?;
    native(spin.set_property("upper", Property::Number(f64::MAX)))?;
    native(spin.set_property("value", Property::Number(current)))?;
    native(spin.set_property("lower", Property::Number(lower)))?;
    native(spin.set_property("upper", Property::Number(upper)))
}

fn set_increment(spin: &Object, v: &Value) -> Result<(), InvalidValue> {
    let (step, page) = match numbers(v)?[..] {
        [step] => (step, step * 10.0),
        [step, page] => (step, page),
        _ => return Err(InvalidValue(format!("increment `{v}` is not `step[,page]`"))),
    };
    native(spin.set_property("step", Property::Number(step)))?;
    native(spin.set_property("page", Property::Number(page)))
}
