//! Box model playground: margin, border, padding and content width.

use serde_json::{json, Map, Value};

use crate::error::{PlaygroundError, Result};
use crate::param::find_spec;
use crate::{Bounds, ParamSpec, ParamValue, ParameterSet, Playground, StyleDescriptor, Topic};

/// Margin range in pixels.
pub const MARGIN: Bounds = Bounds::new(0, 50);
/// Border width range in pixels.
pub const BORDER: Bounds = Bounds::new(0, 20);
/// Padding range in pixels.
pub const PADDING: Bounds = Bounds::new(0, 50);
/// Content width range in pixels.
pub const CONTENT_WIDTH: Bounds = Bounds::new(50, 300);

/// Content height is fixed in the preview.
const CONTENT_HEIGHT: u32 = 100;

static SCHEMA: [ParamSpec; 4] = [
    ParamSpec::range("margin", "Margin", MARGIN, "px"),
    ParamSpec::range("border", "Border", BORDER, "px"),
    ParamSpec::range("padding", "Padding", PADDING, "px"),
    ParamSpec::range("content-width", "Content Width", CONTENT_WIDTH, "px"),
];

/// Parameter record for the box model playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxModel {
    margin: u32,
    border: u32,
    padding: u32,
    content_width: u32,
}

impl Default for BoxModel {
    fn default() -> Self {
        Self {
            margin: 20,
            border: 10,
            padding: 20,
            content_width: 200,
        }
    }
}

impl BoxModel {
    /// Sets the margin, clamped to [`MARGIN`].
    pub fn set_margin(&mut self, px: i64) {
        self.margin = MARGIN.clamp(px);
    }

    /// Sets the border width, clamped to [`BORDER`].
    pub fn set_border(&mut self, px: i64) {
        self.border = BORDER.clamp(px);
    }

    /// Sets the padding, clamped to [`PADDING`].
    pub fn set_padding(&mut self, px: i64) {
        self.padding = PADDING.clamp(px);
    }

    /// Sets the content width, clamped to [`CONTENT_WIDTH`].
    pub fn set_content_width(&mut self, px: i64) {
        self.content_width = CONTENT_WIDTH.clamp(px);
    }

    /// Current margin in pixels.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Current border width in pixels.
    #[must_use]
    pub const fn border(&self) -> u32 {
        self.border
    }

    /// Current padding in pixels.
    #[must_use]
    pub const fn padding(&self) -> u32 {
        self.padding
    }

    /// Current content width in pixels.
    #[must_use]
    pub const fn content_width(&self) -> u32 {
        self.content_width
    }

    /// Horizontal space the element occupies, margins included.
    ///
    /// # Examples
    ///
    /// ```
    /// use mastery_playground::BoxModel;
    ///
    /// let mut model = BoxModel::default();
    /// model.set_margin(5);
    /// model.set_border(1);
    /// model.set_padding(10);
    /// model.set_content_width(100);
    /// assert_eq!(model.total_width(), 100 + 20 + 2 + 10);
    /// ```
    #[must_use]
    pub const fn total_width(&self) -> u32 {
        self.content_width + 2 * self.padding + 2 * self.border + 2 * self.margin
    }
}

impl Playground for BoxModel {
    fn topic(&self) -> Topic {
        Topic::BoxModel
    }

    fn schema(&self) -> &'static [ParamSpec] {
        &SCHEMA
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        let spec = find_spec(&SCHEMA, name)
            .ok_or_else(|| PlaygroundError::unknown_parameter(Topic::BoxModel, name))?;
        let px = spec.read_integer(value)?;
        match spec.name {
            "margin" => self.margin = px,
            "border" => self.border = px,
            "padding" => self.padding = px,
            _ => self.content_width = px,
        }
        Ok(())
    }

    fn parameters(&self) -> ParameterSet {
        ParameterSet::from([
            ("margin".to_string(), self.margin.into()),
            ("border".to_string(), self.border.into()),
            ("padding".to_string(), self.padding.into()),
            ("content-width".to_string(), self.content_width.into()),
        ])
    }

    fn style_descriptor(&self) -> StyleDescriptor {
        StyleDescriptor::new()
            .with("width", format!("{}px", self.content_width))
            .with("height", format!("{CONTENT_HEIGHT}px"))
            .with("padding", format!("{}px", self.padding))
            .with("border-width", format!("{}px", self.border))
            .with("margin", format!("{}px", self.margin))
    }

    fn snippet(&self) -> String {
        self.style_descriptor().to_css(".box")
    }

    fn derived(&self) -> Map<String, Value> {
        let mut derived = Map::new();
        derived.insert("totalWidth".into(), json!(self.total_width()));
        derived.insert(
            "contentLabel".into(),
            json!(format!("{} x {CONTENT_HEIGHT}", self.content_width)),
        );
        derived
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
