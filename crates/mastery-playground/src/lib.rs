//! CSS Mastery Playgrounds
//!
//! State controllers for the interactive CSS playgrounds. Each playground is a
//! fixed-shape parameter record that derives a [`StyleDescriptor`] and a CSS
//! snippet as pure functions of its current values.
//!
//! # Example
//!
//! ```rust
//! use mastery_playground::{ParamValue, Playground, PlaygroundSet, Topic};
//!
//! let mut playgrounds = PlaygroundSet::new();
//! let view = playgrounds
//!     .set_parameter(Topic::Grid, "columns", &ParamValue::Integer(4))
//!     .unwrap();
//! assert_eq!(view.descriptor.get("grid-template-columns"), Some("repeat(4, 1fr)"));
//! assert!(playgrounds.get(Topic::Grid).snippet().starts_with(".grid-container {"));
//! ```

pub mod box_model;
mod controller;
mod descriptor;
pub mod error;
pub mod flex;
pub mod grid;
mod param;
pub mod positioning;
pub mod responsive;
mod topic;

pub use box_model::BoxModel;
pub use controller::{Playground, PlaygroundSet, PlaygroundView};
pub use descriptor::StyleDescriptor;
pub use error::{PlaygroundError, Result};
pub use flex::{Align, Direction, FlexLayout, ItemSize, Justify, Wrap};
pub use grid::{GridLayout, TrackSize};
pub use param::{Bounds, Choice, Domain, ParamSpec, ParamValue, ParameterSet};
pub use positioning::{PositionMode, Positioning};
pub use responsive::{Breakpoint, Responsive};
pub use topic::Topic;
