//! Playground topic identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;

/// One interactive playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// Margin, border, padding and content width.
    BoxModel,
    /// Flex container alignment.
    Flex,
    /// Grid track templates.
    Grid,
    /// Position modes and offsets.
    Positioning,
    /// Viewport width and breakpoints.
    Responsive,
}

impl Topic {
    /// Every topic, in navigation order.
    pub const ALL: [Self; 5] = [
        Self::BoxModel,
        Self::Flex,
        Self::Grid,
        Self::Positioning,
        Self::Responsive,
    ];

    /// URL slug, also used for display.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BoxModel => "box-model",
            Self::Flex => "flex",
            Self::Grid => "grid",
            Self::Positioning => "positioning",
            Self::Responsive => "responsive",
        }
    }

    /// Page heading shown above the playground.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BoxModel => "The Box Model",
            Self::Flex => "Flexbox Layout",
            Self::Grid => "CSS Grid",
            Self::Positioning => "Positioning",
            Self::Responsive => "Responsive Design",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Topic {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.slug() == s)
            .ok_or_else(|| PlaygroundError::UnknownTopic(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_through_from_str() {
        for topic in Topic::ALL {
            assert_eq!(topic.slug().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn test_unknown_topic() {
        let err = "tables".parse::<Topic>().unwrap_err();
        assert_eq!(err, PlaygroundError::UnknownTopic("tables".to_string()));
    }

    #[test]
    fn test_serde_matches_slug() {
        assert_eq!(
            serde_json::to_string(&Topic::BoxModel).unwrap(),
            r#""box-model""#
        );
        let topic: Topic = serde_json::from_str(r#""positioning""#).unwrap();
        assert_eq!(topic, Topic::Positioning);
    }
}
