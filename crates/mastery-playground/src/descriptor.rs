//! Style descriptors and their CSS text rendering.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from CSS property name to value.
///
/// Always derived from a parameter set and never stored, so it cannot go stale.
/// Declaration order is preserved for snippet rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDescriptor {
    properties: IndexMap<String, String>,
}

impl StyleDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration, builder style.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.properties.insert(property.to_string(), value.into());
        self
    }

    /// Returns the value declared for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    /// Iterates over declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Renders all declarations as one CSS rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use mastery_playground::StyleDescriptor;
    ///
    /// let css = StyleDescriptor::new()
    ///     .with("display", "grid")
    ///     .with("gap", "10px")
    ///     .to_css(".grid-container");
    /// assert_eq!(css, ".grid-container {\n  display: grid;\n  gap: 10px;\n}");
    /// ```
    #[must_use]
    pub fn to_css(&self, selector: &str) -> String {
        css_rule(selector, self.iter(), 0)
    }
}

/// Formats a rule block indented by `depth` levels of two spaces.
pub(crate) fn css_rule<'a>(
    selector: &str,
    declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
    depth: usize,
) -> String {
    let pad = "  ".repeat(depth);
    let mut out = format!("{pad}{selector} {{\n");
    for (property, value) in declarations {
        let _ = writeln!(out, "{pad}  {property}: {value};");
    }
    out.push_str(&pad);
    out.push('}');
    out
}

/// Wraps an already formatted rule in a `min-width` media query.
pub(crate) fn media_min_width(min_width: &str, inner: &str) -> String {
    format!("@media (min-width: {min_width}) {{\n{inner}\n}}")
}
