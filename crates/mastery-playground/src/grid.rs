//! Grid playground: track counts, track sizes and gap.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{PlaygroundError, Result};
use crate::param::find_spec;
use crate::{
    Bounds, Choice, ParamSpec, ParamValue, ParameterSet, Playground, StyleDescriptor, Topic,
};

/// Row and column count range.
pub const TRACKS: Bounds = Bounds::new(1, 6);
/// Gap range in pixels.
pub const GAP: Bounds = Bounds::new(0, 50);

/// Size keyword applied to every track of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackSize {
    /// `1fr`, one fraction of the free space.
    #[serde(rename = "1fr")]
    Fraction,
    /// `100px`, a fixed track.
    #[serde(rename = "100px")]
    Fixed,
    /// `auto`, sized by content.
    #[serde(rename = "auto")]
    Auto,
}

impl Choice for TrackSize {
    const ALL: &'static [Self] = &[Self::Fraction, Self::Fixed, Self::Auto];
    const NAMES: &'static [&'static str] = &["1fr", "100px", "auto"];

    fn as_str(self) -> &'static str {
        match self {
            Self::Fraction => "1fr",
            Self::Fixed => "100px",
            Self::Auto => "auto",
        }
    }
}

static SCHEMA: [ParamSpec; 5] = [
    ParamSpec::range("rows", "Rows", TRACKS, ""),
    ParamSpec::range("columns", "Columns", TRACKS, ""),
    ParamSpec::range("gap", "Gap", GAP, "px"),
    ParamSpec::choice("row-track-size", "Row Unit", TrackSize::NAMES),
    ParamSpec::choice("column-track-size", "Column Unit", TrackSize::NAMES),
];

/// Parameter record for the grid playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    rows: u32,
    columns: u32,
    gap: u32,
    row_track_size: TrackSize,
    column_track_size: TrackSize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            gap: 10,
            row_track_size: TrackSize::Fraction,
            column_track_size: TrackSize::Fraction,
        }
    }
}

impl GridLayout {
    /// Sets the row count, clamped to [`TRACKS`].
    pub fn set_rows(&mut self, rows: i64) {
        self.rows = TRACKS.clamp(rows);
    }

    /// Sets the column count, clamped to [`TRACKS`].
    pub fn set_columns(&mut self, columns: i64) {
        self.columns = TRACKS.clamp(columns);
    }

    /// Sets the gap, clamped to [`GAP`].
    pub fn set_gap(&mut self, px: i64) {
        self.gap = GAP.clamp(px);
    }

    /// Sets the row track size.
    pub fn set_row_track_size(&mut self, size: TrackSize) {
        self.row_track_size = size;
    }

    /// Sets the column track size.
    pub fn set_column_track_size(&mut self, size: TrackSize) {
        self.column_track_size = size;
    }

    /// Current row count.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Current column count.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Current gap in pixels.
    #[must_use]
    pub const fn gap(&self) -> u32 {
        self.gap
    }

    /// Current row track size.
    #[must_use]
    pub const fn row_track_size(&self) -> TrackSize {
        self.row_track_size
    }

    /// Current column track size.
    #[must_use]
    pub const fn column_track_size(&self) -> TrackSize {
        self.column_track_size
    }

    /// Number of cells the preview renders.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// `grid-template-columns` value.
    #[must_use]
    pub fn column_template(&self) -> String {
        repeat(self.columns, self.column_track_size)
    }

    /// `grid-template-rows` value.
    #[must_use]
    pub fn row_template(&self) -> String {
        repeat(self.rows, self.row_track_size)
    }
}

fn repeat(count: u32, size: TrackSize) -> String {
    format!("repeat({count}, {})", size.as_str())
}

impl Playground for GridLayout {
    fn topic(&self) -> Topic {
        Topic::Grid
    }

    fn schema(&self) -> &'static [ParamSpec] {
        &SCHEMA
    }

    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        let spec = find_spec(&SCHEMA, name)
            .ok_or_else(|| PlaygroundError::unknown_parameter(Topic::Grid, name))?;
        match spec.name {
            "rows" => self.rows = spec.read_integer(value)?,
            "columns" => self.columns = spec.read_integer(value)?,
            "gap" => self.gap = spec.read_integer(value)?,
            "row-track-size" => self.row_track_size = spec.read_choice(value)?,
            _ => self.column_track_size = spec.read_choice(value)?,
        }
        Ok(())
    }

    fn parameters(&self) -> ParameterSet {
        ParameterSet::from([
            ("rows".to_string(), self.rows.into()),
            ("columns".to_string(), self.columns.into()),
            ("gap".to_string(), self.gap.into()),
            (
                "row-track-size".to_string(),
                ParamValue::choice(self.row_track_size),
            ),
            (
                "column-track-size".to_string(),
                ParamValue::choice(self.column_track_size),
            ),
        ])
    }

    fn style_descriptor(&self) -> StyleDescriptor {
        StyleDescriptor::new()
            .with("display", "grid")
            .with("grid-template-columns", self.column_template())
            .with("grid-template-rows", self.row_template())
            .with("gap", format!("{}px", self.gap))
    }

    fn snippet(&self) -> String {
        self.style_descriptor().to_css(".grid-container")
    }

    fn derived(&self) -> Map<String, Value> {
        let mut derived = Map::new();
        derived.insert("cells".into(), json!(self.cell_count()));
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
    fn test_column_template_scenario() {
        let mut grid = GridLayout::default();
        grid.set_rows(3);
        grid.set_columns(4);
        grid.set_column_track_size(TrackSize::Fixed);

        let descriptor = grid.style_descriptor();
        assert_eq!(
            descriptor.get("grid-template-columns"),
            Some("repeat(4, 100px)")
        );
        assert_eq!(descriptor.get("grid-template-rows"), Some("repeat(3, 1fr)"));
    }

    #[test]
    fn test_same_scenario_by_name() {
        let mut grid = GridLayout::default();
        grid.set_parameter("rows", &ParamValue::Integer(3)).unwrap();
        grid.set_parameter("columns", &ParamValue::Integer(4)).unwrap();
        grid.set_parameter("column-track-size", &ParamValue::from("100px"))
            .unwrap();
        assert_eq!(grid.column_template(), "repeat(4, 100px)");
    }

    #[test]
    fn test_track_counts_clamp() {
        let mut grid = GridLayout::default();
        grid.set_rows(0);
        grid.set_columns(9);
        grid.set_gap(-1);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.columns(), 6);
        assert_eq!(grid.gap(), 0);
        assert_eq!(grid.cell_count(), 6);
    }

    #[test]
    fn test_track_size_serde() {
        assert_eq!(serde_json::to_string(&TrackSize::Fraction).unwrap(), r#""1fr""#);
        let size: TrackSize = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(size, TrackSize::Auto);
    }

    #[test]
    fn test_rejects_unlisted_track_size() {
        let mut grid = GridLayout::default();
        let err = grid
            .set_parameter("row-track-size", &ParamValue::from("2fr"))
            .unwrap_err();
        assert!(err.to_string().contains("1fr, 100px, auto"));
    }

    #[test]
    fn test_snippet() {
        let mut grid = GridLayout::default();
        grid.set_gap(24);
        grid.set_row_track_size(TrackSize::Auto);
        insta::assert_snapshot!(grid.snippet(), @r"
        .grid-container {
          display: grid;
          grid-template-columns: repeat(3, 1fr);
          grid-template-rows: repeat(3, auto);
          gap: 24px;
        }
        ");
    }

    #[test]
    fn test_derived_cells() {
        let mut grid = GridLayout::default();
        grid.set_rows(2);
        grid.set_columns(5);
        assert_eq!(grid.derived()["cells"], 10);
    }
}
