//! Positioning playground: position mode and top/left offsets.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{PlaygroundError, Result};
use crate::param::find_spec;
use crate::{
    Bounds, Choice, ParamSpec, ParamValue, ParameterSet, Playground, StyleDescriptor, Topic,
};

/// Offset range in pixels for `top` and `left`.
pub const OFFSET: Bounds = Bounds::new(0, 150);

/// `position` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Normal flow.
    Static,
    /// Offset from the normal position.
    Relative,
    /// Offset from the nearest positioned ancestor.
    Absolute,
    /// Offset from the viewport.
    Fixed,
    /// Relative until a scroll threshold, then fixed.
    Sticky,
}

impl Choice for PositionMode {
    const ALL: &'static [Self] = &[
        Self::Static,
        Self::Relative,
        Self::Absolute,
        Self::Fixed,
        Self::Sticky,
    ];
    const NAMES: &'static [&'static str] = &["static", "relative", "absolute", "fixed", "sticky"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

impl PositionMode {
    /// One-line explanation shown under the controls.
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::Static => "Normal flow. Top/Left have no effect.",
            Self::Relative => {
                "Offset relative to its normal position. Keeps its space in flow."
            }
            Self::Absolute => {
                "Removed from flow. Positioned relative to nearest positioned ancestor."
            }
            Self::Fixed => "Removed from flow. Positioned relative to the viewport (screen).",
            Self::Sticky => "Toggles between relative and fixed based on scroll position.",
        }
    }

    /// Returns `true` if `top`/`left` take effect in this mode.
    #[must_use]
    pub const fn applies_offsets(self) -> bool {
        !matches!(self, Self::Static)
    }
}

static SCHEMA: [ParamSpec; 3] = [
    ParamSpec::choice("position", "Position Property", PositionMode::NAMES),
    ParamSpec::range("top", "Top", OFFSET, "px"),
    ParamSpec::range("left", "Left", OFFSET, "px"),
];

/// Parameter record for the positioning playground.
///
/// Offsets are kept while the mode is `static` so switching back restores
/// them; only the descriptor hides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Positioning {
    mode: PositionMode,
    top: u32,
    left: u32,
}

impl Default for Positioning {
    fn default() -> Self {
        Self {
            mode: PositionMode::Static,
            top: 20,
            left: 20,
        }
    }
}

impl Positioning {
    /// Sets the position mode. Offsets are left as they are.
    pub fn set_mode(&mut self, mode: PositionMode) {
        self.mode = mode;
    }

    /// Sets the top offset, clamped to [`OFFSET`].
    pub fn set_top(&mut self, px: i64) {
        self.top = OFFSET.clamp(px);
    }

    /// Sets the left offset, clamped to [`OFFSET`].
    pub fn set_left(&mut self, px: i64) {
        self.left = OFFSET.clamp(px);
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> PositionMode {
        self.mode
    }

    /// Stored top offset, whether or not it is applied.
    #[must_use]
    pub const fn top(&self) -> u32 {
        self.top
    }

    /// Stored left offset, whether or not it is applied.
    #[must_use]
    pub const fn left(&self) -> u32 {
        self.left
    }

    fn offset(&self, px: u32) -> String {
        if self.mode.applies_offsets() {
            format!("{px}px")
        } else {
            "auto".to_string()
        }
    }
}

impl Playground for Positioning {
    fn topic(&self) -> Topic {
        Topic::Positioning
    }

    fn schema(&self) -> &'static [ParamSpec] {
        &SCHEMA
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        let spec = find_spec(&SCHEMA, name)
            .ok_or_else(|| PlaygroundError::unknown_parameter(Topic::Positioning, name))?;
        match spec.name {
            "position" => self.mode = spec.read_choice(value)?,
            "top" => self.top = spec.read_integer(value)?,
            _ => self.left = spec.read_integer(value)?,
        }
        Ok(())
    }

    fn parameters(&self) -> ParameterSet {
        ParameterSet::from([
            ("position".to_string(), ParamValue::choice(self.mode)),
            ("top".to_string(), self.top.into()),
            ("left".to_string(), self.left.into()),
        ])
    }

    fn style_descriptor(&self) -> StyleDescriptor {
        StyleDescriptor::new()
            .with("position", self.mode.as_str())
            .with("top", self.offset(self.top))
            .with("left", self.offset(self.left))
    }

    fn snippet(&self) -> String {
        if self.mode.applies_offsets() {
            return self.style_descriptor().to_css(".element");
        }
        // `auto` offsets are noise in the code panel.
        StyleDescriptor::new()
            .with("position", self.mode.as_str())
            .to_css(".element")
    }

    fn derived(&self) -> Map<String, Value> {
        let mut derived = Map::new();
        derived.insert("explanation".into(), json!(self.mode.explanation()));
        derived.insert("offsetsApplied".into(), json!(self.mode.applies_offsets()));
        derived
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_static_emits_auto_offsets() {
        let mut pos = Positioning::default();
        pos.set_top(75);
        pos.set_left(150);
        let descriptor = pos.style_descriptor();
        assert_eq!(descriptor.get("position"), Some("static"));
        assert_eq!(descriptor.get("top"), Some("auto"));
        assert_eq!(descriptor.get("left"), Some("auto"));
    }

    #[test]
    fn test_non_static_emits_stored_offsets() {
        for mode in PositionMode::ALL.iter().copied().filter(|m| *m != PositionMode::Static) {
            let mut pos = Positioning::default();
            pos.set_mode(mode);
            pos.set_top(33);
            pos.set_left(0);
            let descriptor = pos.style_descriptor();
            assert_eq!(descriptor.get("position"), Some(mode.as_str()));
            assert_eq!(descriptor.get("top"), Some("33px"));
            assert_eq!(descriptor.get("left"), Some("0px"));
        }
    }

    #[test]
    fn test_offsets_survive_round_trip_through_static() {
        let mut pos = Positioning::default();
        pos.set_mode(PositionMode::Absolute);
        pos.set_top(120);
        pos.set_mode(PositionMode::Static);
        assert_eq!(pos.top(), 120);

        pos.set_mode(PositionMode::Absolute);
        assert_eq!(pos.style_descriptor().get("top"), Some("120px"));
    }

    #[test]
    fn test_offsets_clamp() {
        let mut pos = Positioning::default();
        pos.set_parameter("top", &ParamValue::Integer(151)).unwrap();
        pos.set_parameter("left", &ParamValue::Integer(-4)).unwrap();
        assert_eq!(pos.top(), 150);
        assert_eq!(pos.left(), 0);
    }

    #[test]
    fn test_mode_by_name() {
        let mut pos = Positioning::default();
        pos.set_parameter("position", &ParamValue::from("sticky"))
            .unwrap();
        assert_eq!(pos.mode(), PositionMode::Sticky);

        let err = pos
            .set_parameter("position", &ParamValue::from("float"))
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidChoice { .. }));
    }

    #[test]
    fn test_static_snippet_omits_offsets() {
        insta::assert_snapshot!(Positioning::default().snippet(), @r"
        .element {
          position: static;
        }
        ");
    }

    #[test]
    fn test_relative_snippet() {
        let mut pos = Positioning::default();
        pos.set_mode(PositionMode::Relative);
        insta::assert_snapshot!(pos.snippet(), @r"
        .element {
          position: relative;
          top: 20px;
          left: 20px;
        }
        ");
    }

    #[test]
    fn test_explanation_in_derived() {
        let mut pos = Positioning::default();
        pos.set_mode(PositionMode::Fixed);
        let derived = pos.derived();
        assert_eq!(
            derived["explanation"],
            "Removed from flow. Positioned relative to the viewport (screen)."
        );
        assert_eq!(derived["offsetsApplied"], true);
    }
}
