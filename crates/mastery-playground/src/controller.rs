//! The controller contract shared by all playgrounds, and the set that owns
//! one controller per topic.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::{
    BoxModel, FlexLayout, GridLayout, ParamSpec, ParamValue, ParameterSet, Positioning,
    Responsive, StyleDescriptor, Topic,
};

/// A playground state controller.
///
/// Implementors are fixed-shape parameter records. Everything besides
/// `set_parameter` and `reset` is a pure function of the current record, so
/// reading twice without a mutation in between yields identical output.
pub trait Playground: fmt::Debug + Send + Sync {
    /// Which topic this controller drives.
    fn topic(&self) -> Topic;

    /// Static schema of the topic's parameters.
    fn schema(&self) -> &'static [ParamSpec];

    /// Replaces one parameter by name.
    ///
    /// Numeric values are clamped into range. Unknown names, choices outside
    /// the enumerated set and values of the wrong kind are contract
    /// violations and fail immediately, leaving the record untouched.
    fn set_parameter(&mut self, name: &str, value: &ParamValue) -> Result<()>;

    /// Current values, keyed by parameter name in schema order.
    fn parameters(&self) -> ParameterSet;

    /// Style declarations derived from the current values.
    fn style_descriptor(&self) -> StyleDescriptor;

    /// CSS text mirroring the descriptor.
    fn snippet(&self) -> String;

    /// Informational values that are not themselves controllable.
    fn derived(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Restores the topic defaults.
    fn reset(&mut self);

    /// Bundles everything the rendering surface needs.
    fn view(&self) -> PlaygroundView {
        let topic = self.topic();
        PlaygroundView {
            topic,
            title: topic.title(),
            schema: self.schema(),
            parameters: self.parameters(),
            descriptor: self.style_descriptor(),
            snippet: self.snippet(),
            derived: self.derived(),
        }
    }
}

/// Serializable snapshot of one playground for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaygroundView {
    /// Topic identifier.
    pub topic: Topic,
    /// Page heading.
    pub title: &'static str,
    /// Control widget metadata.
    pub schema: &'static [ParamSpec],
    /// Current values for the control widgets.
    pub parameters: ParameterSet,
    /// Declarations for the live preview.
    pub descriptor: StyleDescriptor,
    /// CSS text for the code panel.
    pub snippet: String,
    /// Informational values.
    pub derived: Map<String, Value>,
}

/// One controller per topic, created with topic defaults.
#[derive(Debug, Clone, Default)]
pub struct PlaygroundSet {
    box_model: BoxModel,
    flex: FlexLayout,
    grid: GridLayout,
    positioning: Positioning,
    responsive: Responsive,
}

impl PlaygroundSet {
    /// Creates every controller with its defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the controller for `topic`.
    #[must_use]
    pub fn get(&self, topic: Topic) -> &dyn Playground {
        match topic {
            Topic::BoxModel => &self.box_model,
            Topic::Flex => &self.flex,
            Topic::Grid => &self.grid,
            Topic::Positioning => &self.positioning,
            Topic::Responsive => &self.responsive,
        }
    }

    /// Returns the controller for `topic`, mutably.
    pub fn get_mut(&mut self, topic: Topic) -> &mut dyn Playground {
        match topic {
            Topic::BoxModel => &mut self.box_model,
            Topic::Flex => &mut self.flex,
            Topic::Grid => &mut self.grid,
            Topic::Positioning => &mut self.positioning,
            Topic::Responsive => &mut self.responsive,
        }
    }

    /// Sets one parameter and returns the recomputed view.
    pub fn set_parameter(
        &mut self,
        topic: Topic,
        name: &str,
        value: &ParamValue,
    ) -> Result<PlaygroundView> {
        let controller = self.get_mut(topic);
        controller.set_parameter(name, value)?;
        debug!(topic = %topic, name, value = %value, "Parameter updated");
        Ok(controller.view())
    }

    /// Restores the defaults of one topic and returns its view.
    pub fn reset(&mut self, topic: Topic) -> PlaygroundView {
        let controller = self.get_mut(topic);
        controller.reset();
        controller.view()
    }

    /// Views of every topic, in navigation order.
    #[must_use]
    pub fn views(&self) -> Vec<PlaygroundView> {
        Topic::ALL.into_iter().map(|t| self.get(t).view()).collect()
    }
}
