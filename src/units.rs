//! Unit helpers available to style declarations.
//!
//! [`Units`] exposes the same functions in two modes. In
//! [`UnitMode::Numeric`] they compute device-pixel numbers from the live
//! viewport and font scale. In [`UnitMode::Literal`] they return CSS
//! expressions (`"50vw"`, `"calc(1rem + 4)"`) so that markup rendered before
//! mount does not depend on a viewport size that is not known yet.

use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::util::format_number;
use crate::viewport::ViewportSource;

/// Base font size in device pixels that `em` and `rem` scale.
pub const BASE_FONT_SIZE: f64 = 16.0;

/// Which return domain unit helpers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMode {
    /// CSS length expressions as strings.
    Literal,
    /// Computed numbers.
    Numeric,
}

/// A length produced by a unit helper.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Number(f64),
    Literal(String),
}

impl Dimension {
    /// The numeric value, or NaN for a literal expression.
    pub fn as_f64(&self) -> f64 {
        match self {
            Dimension::Number(n) => *n,
            Dimension::Literal(_) => f64::NAN,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Number(n) => f.write_str(&format_number(*n)),
            Dimension::Literal(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Dimension {
    fn from(n: f64) -> Self {
        Dimension::Number(n)
    }
}

impl From<i32> for Dimension {
    fn from(n: i32) -> Self {
        Dimension::Number(n as f64)
    }
}

impl From<&str> for Dimension {
    fn from(s: &str) -> Self {
        Dimension::Literal(s.to_string())
    }
}

impl From<String> for Dimension {
    fn from(s: String) -> Self {
        Dimension::Literal(s)
    }
}

impl From<Dimension> for Value {
    /// NaN and infinities have no JSON representation and become `null`.
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                Value::from(n as i64)
            }
            Dimension::Number(n) => Value::from(n),
            Dimension::Literal(s) => Value::String(s),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self.clone()).serialize(serializer)
    }
}

/// Arithmetic operator accepted by [`Units::calc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl CalcOp {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            CalcOp::Add => a + b,
            CalcOp::Sub => a - b,
            CalcOp::Mul => a * b,
            CalcOp::Div => a / b,
        }
    }
}

impl fmt::Display for CalcOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalcOp::Add => "+",
            CalcOp::Sub => "-",
            CalcOp::Mul => "*",
            CalcOp::Div => "/",
        })
    }
}

/// Unit helpers bound to a mode and a viewport.
///
/// # Example
///
/// ```rust
/// use responsive_stylesheet::{Dimension, Dimensions, ManualViewport, UnitMode, Units};
/// use std::rc::Rc;
///
/// let viewport = Rc::new(ManualViewport::new(Dimensions::new(400.0, 800.0)));
///
/// let numeric = Units::new(UnitMode::Numeric, viewport.clone());
/// assert_eq!(numeric.vw(50.0), Dimension::Number(200.0));
///
/// let literal = Units::new(UnitMode::Literal, viewport);
/// assert_eq!(literal.vw(50.0), Dimension::Literal("50vw".into()));
/// ```
#[derive(Clone)]
pub struct Units {
    mode: UnitMode,
    viewport: Rc<dyn ViewportSource>,
}

impl Units {
    pub fn new(mode: UnitMode, viewport: Rc<dyn ViewportSource>) -> Self {
        Self { mode, viewport }
    }

    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    fn literal(&self) -> bool {
        self.mode == UnitMode::Literal
    }

    pub fn em(&self, n: f64) -> Dimension {
        if self.literal() {
            Dimension::Literal(format!("{}em", format_number(n)))
        } else {
            Dimension::Number(n * self.viewport.get().font_scale * BASE_FONT_SIZE)
        }
    }

    /// Same as [`Units::em`] in numeric mode; there is no root scale.
    pub fn rem(&self, n: f64) -> Dimension {
        if self.literal() {
            Dimension::Literal(format!("{}rem", format_number(n)))
        } else {
            self.em(n)
        }
    }

    pub fn vw(&self, n: f64) -> Dimension {
        if self.literal() {
            Dimension::Literal(format!("{}vw", format_number(n)))
        } else {
            Dimension::Number(n * self.viewport.get().width / 100.0)
        }
    }

    pub fn vh(&self, n: f64) -> Dimension {
        if self.literal() {
            Dimension::Literal(format!("{}vh", format_number(n)))
        } else {
            Dimension::Number(n * self.viewport.get().height / 100.0)
        }
    }

    /// Smallest of `values`. An empty list yields `+inf` in numeric mode.
    pub fn min<I, D>(&self, values: I) -> Dimension
    where
        I: IntoIterator<Item = D>,
        D: Into<Dimension>,
    {
        self.fold("min", values, f64::INFINITY, f64::min)
    }

    /// Largest of `values`. An empty list yields `-inf` in numeric mode.
    pub fn max<I, D>(&self, values: I) -> Dimension
    where
        I: IntoIterator<Item = D>,
        D: Into<Dimension>,
    {
        self.fold("max", values, f64::NEG_INFINITY, f64::max)
    }

    /// Evaluates `first op second`.
    ///
    /// Division by zero is not guarded; the float result (infinity or NaN)
    /// is returned as-is.
    pub fn calc(
        &self,
        first: impl Into<Dimension>,
        op: CalcOp,
        second: impl Into<Dimension>,
    ) -> Dimension {
        let (first, second) = (first.into(), second.into());
        if self.literal() {
            Dimension::Literal(format!("calc({} {} {})", first, op, second))
        } else {
            Dimension::Number(op.apply(first.as_f64(), second.as_f64()))
        }
    }

    fn fold<I, D>(&self, name: &str, values: I, init: f64, pick: fn(f64, f64) -> f64) -> Dimension
    where
        I: IntoIterator<Item = D>,
        D: Into<Dimension>,
    {
        let values: Vec<Dimension> = values.into_iter().map(Into::into).collect();
        if self.literal() {
            let args: Vec<String> = values.iter().map(ToString::to_string).collect();
            Dimension::Literal(format!("{}({})", name, args.join(", ")))
        } else {
            // NaN must win over any number, which f64::min/max do not do.
            Dimension::Number(values.iter().fold(init, |acc, v| {
                let v = v.as_f64();
                if acc.is_nan() || v.is_nan() {
                    f64::NAN
                } else {
                    pick(acc, v)
                }
            }))
        }
    }
}

impl fmt::Debug for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Units").field("mode", &self.mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{Dimensions, ManualViewport};

    fn units(mode: UnitMode) -> Units {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 1000.0).with_font_scale(1.5));
        Units::new(mode, Rc::new(viewport))
    }

    #[test]
    fn test_numeric_units() {
        let u = units(UnitMode::Numeric);
        assert_eq!(u.em(2.0), Dimension::Number(48.0));
        assert_eq!(u.rem(2.0), Dimension::Number(48.0));
        assert_eq!(u.vw(50.0), Dimension::Number(200.0));
        assert_eq!(u.vh(10.0), Dimension::Number(100.0));
        assert_eq!(u.min([3.0, 1.0, 2.0]), Dimension::Number(1.0));
        assert_eq!(u.max([3.0, 1.0, 2.0]), Dimension::Number(3.0));
        assert_eq!(u.calc(10.0, CalcOp::Add, 5.0), Dimension::Number(15.0));
        assert_eq!(u.calc(10.0, CalcOp::Sub, 5.0), Dimension::Number(5.0));
        assert_eq!(u.calc(10.0, CalcOp::Mul, 5.0), Dimension::Number(50.0));
        assert_eq!(u.calc(10.0, CalcOp::Div, 5.0), Dimension::Number(2.0));
    }

    #[test]
    fn test_literal_units() {
        let u = units(UnitMode::Literal);
        assert_eq!(u.em(2.0), Dimension::Literal("2em".into()));
        assert_eq!(u.rem(1.5), Dimension::Literal("1.5rem".into()));
        assert_eq!(u.vw(50.0), Dimension::Literal("50vw".into()));
        assert_eq!(u.vh(100.0), Dimension::Literal("100vh".into()));
        assert_eq!(u.min([1.0, 2.0]), Dimension::Literal("min(1, 2)".into()));
        assert_eq!(u.max([1.0, 2.0]), Dimension::Literal("max(1, 2)".into()));
        assert_eq!(
            u.calc(u.vw(50.0), CalcOp::Sub, 10.0),
            Dimension::Literal("calc(50vw - 10)".into())
        );
    }

    #[test]
    fn test_numeric_reads_viewport_live() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 1000.0));
        let u = Units::new(UnitMode::Numeric, Rc::new(viewport.clone()));
        viewport.set(Dimensions::new(800.0, 1000.0));
        assert_eq!(u.vw(50.0), Dimension::Number(400.0));
    }

    #[test]
    fn test_division_by_zero_propagates() {
        let u = units(UnitMode::Numeric);
        assert_eq!(u.calc(1.0, CalcOp::Div, 0.0), Dimension::Number(f64::INFINITY));
        assert!(u.calc(0.0, CalcOp::Div, 0.0).as_f64().is_nan());
        assert_eq!(Value::from(u.calc(0.0, CalcOp::Div, 0.0)), Value::Null);
    }

    #[test]
    fn test_literal_argument_in_numeric_mode_is_nan() {
        let u = units(UnitMode::Numeric);
        assert!(u.max([Dimension::from(1.0), Dimension::from("2vw")]).as_f64().is_nan());
    }

    #[test]
    fn test_dimension_into_value() {
        assert_eq!(Value::from(Dimension::Number(200.0)), serde_json::json!(200));
        assert_eq!(Value::from(Dimension::Number(0.5)), serde_json::json!(0.5));
        assert_eq!(Value::from(Dimension::from("1em")), serde_json::json!("1em"));
    }

    #[test]
    fn test_dimension_in_json_macro() {
        let u = units(UnitMode::Numeric);
        assert_eq!(
            serde_json::json!({ "width": u.vw(25.0), "margin": u.em(0.5) }),
            serde_json::json!({ "width": 100, "margin": 12 })
        );
    }
}
