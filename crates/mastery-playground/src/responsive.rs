//! Responsive playground: a resizable viewport and its breakpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::descriptor::{css_rule, media_min_width};
use crate::error::{PlaygroundError, Result};
use crate::param::find_spec;
use crate::{Bounds, ParamSpec, ParamValue, ParameterSet, Playground, StyleDescriptor, Topic};

/// Viewport width range, in percent of the preview area.
pub const VIEWPORT_WIDTH: Bounds = Bounds::new(20, 100);

/// Widths below this percentage are mobile.
const TABLET_FROM: u32 = 40;
/// Widths from this percentage up are desktop.
const DESKTOP_FROM: u32 = 70;

static SCHEMA: [ParamSpec; 1] = [ParamSpec::range(
    "viewport-width",
    "Viewport Width",
    VIEWPORT_WIDTH,
    "%",
)];

/// Responsive design tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Narrow screens; default styles, single column.
    Mobile,
    /// Medium screens (≥768px).
    Tablet,
    /// Wide screens (≥1024px).
    Desktop,
}

impl Breakpoint {
    /// Classifies a viewport width percentage.
    ///
    /// Thresholds belong to the upper tier: 40 is tablet and 70 is desktop.
    ///
    /// # Examples
    ///
    /// ```
    /// use mastery_playground::Breakpoint;
    ///
    /// assert_eq!(Breakpoint::classify(39), Breakpoint::Mobile);
    /// assert_eq!(Breakpoint::classify(40), Breakpoint::Tablet);
    /// assert_eq!(Breakpoint::classify(69), Breakpoint::Tablet);
    /// assert_eq!(Breakpoint::classify(70), Breakpoint::Desktop);
    /// ```
    #[must_use]
    pub const fn classify(width_percent: u32) -> Self {
        if width_percent < TABLET_FROM {
            Self::Mobile
        } else if width_percent < DESKTOP_FROM {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// `min-width` of the media query that activates this tier.
    #[must_use]
    pub const fn min_width(self) -> &'static str {
        match self {
            Self::Mobile => "0px",
            Self::Tablet => "768px",
            Self::Desktop => "1024px",
        }
    }

    /// Content grid columns in this tier.
    #[must_use]
    pub const fn columns(self) -> u32 {
        match self {
            Self::Mobile => 1,
            Self::Tablet => 2,
            Self::Desktop => 3,
        }
    }

    /// Navigation links shown in this tier; mobile collapses into a menu.
    #[must_use]
    pub const fn nav_items(self) -> &'static [&'static str] {
        match self {
            Self::Mobile => &[],
            Self::Tablet => &["Home", "About"],
            Self::Desktop => &["Home", "About", "Services"],
        }
    }

    /// Guidance text for this tier.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Mobile => {
                "Default styles apply here. No media query needed. Stack content vertically."
            }
            Self::Tablet => "Expand grid to 2 columns. Show simple navigation.",
            Self::Desktop => "Full 3-column layout. Expanded navigation menu.",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter record for the responsive playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Responsive {
    viewport_width: u32,
}

impl Default for Responsive {
    fn default() -> Self {
        Self {
            viewport_width: 100,
        }
    }
}

impl Responsive {
    /// Sets the viewport width, clamped to [`VIEWPORT_WIDTH`].
    pub fn set_viewport_width(&mut self, percent: i64) {
        self.viewport_width = VIEWPORT_WIDTH.clamp(percent);
    }

    /// Current viewport width in percent.
    #[must_use]
    pub const fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Tier for the current width.
    #[must_use]
    pub const fn breakpoint(&self) -> Breakpoint {
        Breakpoint::classify(self.viewport_width)
    }

    fn layout_columns(&self) -> String {
        format!("repeat({}, 1fr)", self.breakpoint().columns())
    }
}

impl Playground for Responsive {
    fn topic(&self) -> Topic {
        Topic::Responsive
    }

    fn schema(&self) -> &'static [ParamSpec] {
        &SCHEMA
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        let spec = find_spec(&SCHEMA, name)
            .ok_or_else(|| PlaygroundError::unknown_parameter(Topic::Responsive, name))?;
        self.viewport_width = spec.read_integer(value)?;
        Ok(())
    }

    fn parameters(&self) -> ParameterSet {
        ParameterSet::from([("viewport-width".to_string(), self.viewport_width.into())])
    }

    fn style_descriptor(&self) -> StyleDescriptor {
        StyleDescriptor::new()
            .with("width", format!("{}%", self.viewport_width))
            .with("grid-template-columns", self.layout_columns())
    }

    fn snippet(&self) -> String {
        let columns = self.layout_columns();
        let rule = css_rule(
            ".layout",
            [("grid-template-columns", columns.as_str())],
            1,
        );
        media_min_width(self.breakpoint().min_width(), &rule)
    }

    fn derived(&self) -> Map<String, Value> {
        let breakpoint = self.breakpoint();
        let mut derived = Map::new();
        derived.insert("breakpoint".into(), json!(breakpoint));
        derived.insert("minWidth".into(), json!(breakpoint.min_width()));
        derived.insert("columns".into(), json!(breakpoint.columns()));
        derived.insert("navItems".into(), json!(breakpoint.nav_items()));
        derived.insert("guidance".into(), json!(breakpoint.guidance()));
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
    fn test_classify_every_width() {
        for width in 0..=120 {
            let expected = if width < 40 {
                Breakpoint::Mobile
            } else if width < 70 {
                Breakpoint::Tablet
            } else {
                Breakpoint::Desktop
            };
            assert_eq!(Breakpoint::classify(width), expected, "width {width}");
        }
    }

    #[test]
    fn test_boundaries_belong_to_upper_tier() {
        assert_eq!(Breakpoint::classify(20), Breakpoint::Mobile);
        assert_eq!(Breakpoint::classify(39), Breakpoint::Mobile);
        assert_eq!(Breakpoint::classify(40), Breakpoint::Tablet);
        assert_eq!(Breakpoint::classify(69), Breakpoint::Tablet);
        assert_eq!(Breakpoint::classify(70), Breakpoint::Desktop);
        assert_eq!(Breakpoint::classify(100), Breakpoint::Desktop);
    }

    #[test]
    fn test_default_is_desktop() {
        assert_eq!(Responsive::default().breakpoint(), Breakpoint::Desktop);
    }

    #[test]
    fn test_width_clamps_to_twenty() {
        let mut responsive = Responsive::default();
        responsive.set_viewport_width(5);
        assert_eq!(responsive.viewport_width(), 20);
        assert_eq!(responsive.breakpoint(), Breakpoint::Mobile);
    }

    #[test]
    fn test_set_by_name() {
        let mut responsive = Responsive::default();
        responsive
            .set_parameter("viewport-width", &ParamValue::Integer(55))
            .unwrap();
        assert_eq!(responsive.breakpoint(), Breakpoint::Tablet);
        assert_eq!(
            responsive.style_descriptor().get("grid-template-columns"),
            Some("repeat(2, 1fr)")
        );
    }

    #[test]
    fn test_breakpoint_serde() {
        assert_eq!(
            serde_json::to_string(&Breakpoint::Tablet).unwrap(),
            r#""tablet""#
        );
    }

    #[test]
    fn test_snippet_tracks_breakpoint() {
        let mut responsive = Responsive::default();
        responsive.set_viewport_width(45);
        insta::assert_snapshot!(responsive.snippet(), @r"
        @media (min-width: 768px) {
          .layout {
            grid-template-columns: repeat(2, 1fr);
          }
        }
        ");
    }

    #[test]
    fn test_derived_mobile() {
        let mut responsive = Responsive::default();
        responsive.set_viewport_width(30);
        let derived = responsive.derived();
        assert_eq!(derived["breakpoint"], "mobile");
        assert_eq!(derived["minWidth"], "0px");
        assert_eq!(derived["columns"], 1);
        assert_eq!(derived["navItems"], json!([]));
    }
}
