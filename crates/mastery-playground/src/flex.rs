//! Flexbox playground: container direction, alignment and wrapping.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{PlaygroundError, Result};
use crate::param::find_spec;
use crate::{
    Bounds, Choice, ParamSpec, ParamValue, ParameterSet, Playground, StyleDescriptor, Topic,
};

/// Number of preview items.
pub const ITEM_COUNT: Bounds = Bounds::new(1, 12);

/// Gap between items; fixed in the preview.
const GAP: &str = "0.5rem";

/// `flex-direction` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// `row`
    Row,
    /// `row-reverse`
    RowReverse,
    /// `column`
    Column,
    /// `column-reverse`
    ColumnReverse,
}

impl Choice for Direction {
    const ALL: &'static [Self] = &[Self::Row, Self::RowReverse, Self::Column, Self::ColumnReverse];
    const NAMES: &'static [&'static str] = &["row", "row-reverse", "column", "column-reverse"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::RowReverse => "row-reverse",
            Self::Column => "column",
            Self::ColumnReverse => "column-reverse",
        }
    }
}

impl Direction {
    /// Returns `true` for `row` and `row-reverse`.
    #[must_use]
    pub fn is_row(self) -> bool {
        self.as_str().starts_with("row")
    }
}

/// `justify-content` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    /// `flex-start`
    FlexStart,
    /// `flex-end`
    FlexEnd,
    /// `center`
    Center,
    /// `space-between`
    SpaceBetween,
    /// `space-around`
    SpaceAround,
    /// `space-evenly`
    SpaceEvenly,
}

impl Choice for Justify {
    const ALL: &'static [Self] = &[
        Self::FlexStart,
        Self::FlexEnd,
        Self::Center,
        Self::SpaceBetween,
        Self::SpaceAround,
        Self::SpaceEvenly,
    ];
    const NAMES: &'static [&'static str] = &[
        "flex-start",
        "flex-end",
        "center",
        "space-between",
        "space-around",
        "space-evenly",
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::FlexStart => "flex-start",
            Self::FlexEnd => "flex-end",
            Self::Center => "center",
            Self::SpaceBetween => "space-between",
            Self::SpaceAround => "space-around",
            Self::SpaceEvenly => "space-evenly",
        }
    }
}

/// `align-items` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    /// `flex-start`
    FlexStart,
    /// `flex-end`
    FlexEnd,
    /// `center`
    Center,
    /// `stretch`
    Stretch,
    /// `baseline`
    Baseline,
}

impl Choice for Align {
    const ALL: &'static [Self] = &[
        Self::FlexStart,
        Self::FlexEnd,
        Self::Center,
        Self::Stretch,
        Self::Baseline,
    ];
    const NAMES: &'static [&'static str] =
        &["flex-start", "flex-end", "center", "stretch", "baseline"];

    fn as_str(self) -> &'static str {
        match self {
            Self::FlexStart => "flex-start",
            Self::FlexEnd => "flex-end",
            Self::Center => "center",
            Self::Stretch => "stretch",
            Self::Baseline => "baseline",
        }
    }
}

/// `flex-wrap` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Wrap {
    /// `nowrap`
    Nowrap,
    /// `wrap`
    Wrap,
    /// `wrap-reverse`
    WrapReverse,
}

impl Choice for Wrap {
    const ALL: &'static [Self] = &[Self::Nowrap, Self::Wrap, Self::WrapReverse];
    const NAMES: &'static [&'static str] = &["nowrap", "wrap", "wrap-reverse"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Nowrap => "nowrap",
            Self::Wrap => "wrap",
            Self::WrapReverse => "wrap-reverse",
        }
    }
}

static SCHEMA: [ParamSpec; 5] = [
    ParamSpec::choice("direction", "Flex Direction", Direction::NAMES),
    ParamSpec::choice("justify", "Justify Content (Main Axis)", Justify::NAMES),
    ParamSpec::choice("align", "Align Items (Cross Axis)", Align::NAMES),
    ParamSpec::choice("wrap", "Flex Wrap", Wrap::NAMES),
    ParamSpec::range("item-count", "Items", ITEM_COUNT, ""),
];

/// Size of each preview item.
///
/// Secondary geometry for the visualizer only; not part of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSize {
    /// CSS width.
    pub width: &'static str,
    /// CSS height.
    pub height: &'static str,
    /// CSS min-height.
    pub min_height: &'static str,
}

/// Parameter record for the flexbox playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexLayout {
    direction: Direction,
    justify: Justify,
    align: Align,
    wrap: Wrap,
    item_count: u32,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            direction: Direction::Row,
            justify: Justify::Center,
            align: Align::Center,
            wrap: Wrap::Wrap,
            item_count: 4,
        }
    }
}

impl FlexLayout {
    /// Sets `flex-direction`.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Sets `justify-content`.
    pub fn set_justify(&mut self, justify: Justify) {
        self.justify = justify;
    }

    /// Sets `align-items`.
    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    /// Sets `flex-wrap`.
    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
    }

    /// Sets the number of preview items, clamped to [`ITEM_COUNT`].
    pub fn set_item_count(&mut self, count: i64) {
        self.item_count = ITEM_COUNT.clamp(count);
    }

    /// Current direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Current main-axis alignment.
    #[must_use]
    pub const fn justify(&self) -> Justify {
        self.justify
    }

    /// Current cross-axis alignment.
    #[must_use]
    pub const fn align(&self) -> Align {
        self.align
    }

    /// Current wrapping mode.
    #[must_use]
    pub const fn wrap(&self) -> Wrap {
        self.wrap
    }

    /// Number of preview items.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Preview item geometry for the current direction and alignment.
    #[must_use]
    pub fn item_size(&self) -> ItemSize {
        let row = self.direction.is_row();
        ItemSize {
            width: if row { "80px" } else { "80%" },
            height: if row && self.align != Align::Stretch {
                "80px"
            } else {
                "auto"
            },
            min_height: "60px",
        }
    }
}

impl Playground for FlexLayout {
    fn topic(&self) -> Topic {
        Topic::Flex
    }

    fn schema(&self) -> &'static [ParamSpec] {
        &SCHEMA
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        let spec = find_spec(&SCHEMA, name)
            .ok_or_else(|| PlaygroundError::unknown_parameter(Topic::Flex, name))?;
        match spec.name {
            "direction" => self.direction = spec.read_choice(value)?,
            "justify" => self.justify = spec.read_choice(value)?,
            "align" => self.align = spec.read_choice(value)?,
            "wrap" => self.wrap = spec.read_choice(value)?,
            _ => self.item_count = spec.read_integer(value)?,
        }
        Ok(())
    }

    fn parameters(&self) -> ParameterSet {
        ParameterSet::from([
            ("direction".to_string(), ParamValue::choice(self.direction)),
            ("justify".to_string(), ParamValue::choice(self.justify)),
            ("align".to_string(), ParamValue::choice(self.align)),
            ("wrap".to_string(), ParamValue::choice(self.wrap)),
            ("item-count".to_string(), self.item_count.into()),
        ])
    }

    fn style_descriptor(&self) -> StyleDescriptor {
        StyleDescriptor::new()
            .with("display", "flex")
            .with("flex-direction", self.direction.as_str())
            .with("justify-content", self.justify.as_str())
            .with("align-items", self.align.as_str())
            .with("flex-wrap", self.wrap.as_str())
            .with("gap", GAP)
    }

    fn snippet(&self) -> String {
        self.style_descriptor().to_css(".container")
    }

    fn derived(&self) -> Map<String, Value> {
        let mut derived = Map::new();
        derived.insert("isRowAxis".into(), json!(self.direction.is_row()));
        derived.insert("itemSize".into(), json!(self.item_size()));
        derived
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
