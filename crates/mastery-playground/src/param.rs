//! Parameter schema, values and domain checks shared by every playground.
//!
//! Each topic declares its parameters as a static table of [`ParamSpec`]s.
//! Clamping of numeric input and membership checks for enumerated input live
//! here so that no controller repeats them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlaygroundError, Result};

// ============================================================================
// Bounds
// ============================================================================

/// Inclusive integer range for a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest accepted value.
    pub min: u32,
    /// Largest accepted value.
    pub max: u32,
}

impl Bounds {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` to the nearest bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use mastery_playground::Bounds;
    ///
    /// let bounds = Bounds::new(0, 50);
    /// assert_eq!(bounds.clamp(-3), 0);
    /// assert_eq!(bounds.clamp(25), 25);
    /// assert_eq!(bounds.clamp(90), 50);
    /// ```
    #[must_use]
    pub fn clamp(&self, value: i64) -> u32 {
        let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
        u32::try_from(clamped).unwrap_or(self.min)
    }
}

// ============================================================================
// Domain and ParamSpec
// ============================================================================

/// The set of values a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    /// An integer measurement clamped to the range.
    Range {
        /// Accepted range.
        bounds: Bounds,
        /// Unit the value is rendered in (`px`, `%`, or empty for counts).
        unit: &'static str,
    },
    /// One value out of a closed list.
    Choice {
        /// Accepted values, in display order.
        options: &'static [&'static str],
    },
}

/// Schema entry for one named parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Parameter name as used by `set_parameter`.
    pub name: &'static str,
    /// Human-readable label for the control widget.
    pub label: &'static str,
    /// Accepted values.
    pub domain: Domain,
}

impl ParamSpec {
    /// Declares a numeric parameter.
    #[must_use]
    pub const fn range(
        name: &'static str,
        label: &'static str,
        bounds: Bounds,
        unit: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            domain: Domain::Range { bounds, unit },
        }
    }

    /// Declares an enumerated parameter.
    #[must_use]
    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            domain: Domain::Choice { options },
        }
    }

    /// Reads a clamped integer out of `value`.
    ///
    /// Fails with `TypeMismatch` if this spec is not numeric or the value is
    /// not an integer.
    pub fn read_integer(&self, value: &ParamValue) -> Result<u32> {
        let Domain::Range { bounds, .. } = self.domain else {
            return Err(PlaygroundError::type_mismatch(self.name, "one of its options"));
        };
        let ParamValue::Integer(raw) = *value else {
            return Err(PlaygroundError::type_mismatch(self.name, "an integer"));
        };
        let clamped = bounds.clamp(raw);
        if i64::from(clamped) != raw {
            debug!(parameter = self.name, raw, clamped, "Clamped out-of-range input");
        }
        Ok(clamped)
    }

    /// Reads an enumerated value out of `value`.
    pub fn read_choice<T: Choice>(&self, value: &ParamValue) -> Result<T> {
        let ParamValue::Choice(raw) = value else {
            return Err(PlaygroundError::type_mismatch(self.name, "a string option"));
        };
        T::parse(raw).ok_or_else(|| PlaygroundError::invalid_choice(self.name, raw, T::NAMES))
    }
}

/// Looks up `name` in a schema table.
pub(crate) fn find_spec(schema: &'static [ParamSpec], name: &str) -> Option<&'static ParamSpec> {
    schema.iter().find(|spec| spec.name == name)
}

// ============================================================================
// Choice
// ============================================================================

/// A closed set of keyword values, such as `justify-content` keywords.
pub trait Choice: Copy + Sized + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];
    /// CSS keyword for every variant, in the same order as `ALL`.
    const NAMES: &'static [&'static str];

    /// Returns the CSS keyword for this variant.
    fn as_str(self) -> &'static str;

    /// Parses a CSS keyword, exactly as written.
    fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == keyword)
    }
}

// ============================================================================
// ParamValue and ParameterSet
// ============================================================================

/// A loosely typed parameter value as delivered by an input control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric slider value.
    Integer(i64),
    /// Dropdown or button-group selection.
    Choice(String),
}

impl ParamValue {
    /// Wraps a keyword choice.
    #[must_use]
    pub fn choice<T: Choice>(value: T) -> Self {
        Self::Choice(value.as_str().to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Choice(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Choice(s) => f.write_str(s),
        }
    }
}

/// Current values of one playground, keyed by parameter name in schema order.
pub type ParameterSet = IndexMap<String, ParamValue>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Axis {
        Row,
        Column,
    }

    impl Choice for Axis {
        const ALL: &'static [Self] = &[Self::Row, Self::Column];
        const NAMES: &'static [&'static str] = &["row", "column"];

        fn as_str(self) -> &'static str {
            match self {
                Self::Row => "row",
                Self::Column => "column",
            }
        }
    }

    const WIDTH: ParamSpec = ParamSpec::range("width", "Width", Bounds::new(50, 300), "px");
    const AXIS: ParamSpec = ParamSpec::choice("axis", "Axis", Axis::NAMES);

    #[test]
    fn test_bounds_clamp_both_sides() {
        let bounds = Bounds::new(50, 300);
        assert_eq!(bounds.clamp(i64::MIN), 50);
        assert_eq!(bounds.clamp(49), 50);
        assert_eq!(bounds.clamp(50), 50);
        assert_eq!(bounds.clamp(300), 300);
        assert_eq!(bounds.clamp(301), 300);
        assert_eq!(bounds.clamp(i64::MAX), 300);
    }

    #[test]
    fn test_read_integer_clamps() {
        assert_eq!(WIDTH.read_integer(&ParamValue::Integer(1000)).unwrap(), 300);
        assert_eq!(WIDTH.read_integer(&ParamValue::Integer(120)).unwrap(), 120);
    }

    #[test]
    fn test_read_integer_rejects_string() {
        let err = WIDTH.read_integer(&ParamValue::from("wide")).unwrap_err();
        assert!(matches!(err, PlaygroundError::TypeMismatch { parameter: "width", .. }));
    }

    #[test]
    fn test_read_choice_accepts_member() {
        let axis: Axis = AXIS.read_choice(&ParamValue::from("column")).unwrap();
        assert_eq!(axis, Axis::Column);
    }

    #[test]
    fn test_read_choice_rejects_non_member() {
        let err = AXIS.read_choice::<Axis>(&ParamValue::from("Row")).unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidChoice { .. }));
        assert!(err.to_string().contains("row, column"));
    }

    #[test]
    fn test_param_value_untagged_serde() {
        let n: ParamValue = serde_json::from_str("12").unwrap();
        assert_eq!(n, ParamValue::Integer(12));
        let s: ParamValue = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(s, ParamValue::Choice("auto".to_string()));
        assert_eq!(serde_json::to_string(&ParamValue::from(7_u32)).unwrap(), "7");
    }

    #[test]
    fn test_domain_serialization() {
        let json = serde_json::to_value(WIDTH).unwrap();
        assert_eq!(json["domain"]["kind"], "range");
        assert_eq!(json["domain"]["bounds"]["max"], 300);
        assert_eq!(json["domain"]["unit"], "px");
    }
}
