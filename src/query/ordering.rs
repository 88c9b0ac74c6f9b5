use super::QueryPropertyRegistry;
use crate::core::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(EngineError::InvalidQuery(format!(
                "Unknown sort direction '{}', expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

/// A requested sort on one logical property.
///
/// Stored by logical name, so persisted orderings survive storage schema
/// changes and are resolved against a registry only when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOrdering {
    property: String,
    #[serde(default)]
    direction: Direction,
}

impl QueryOrdering {
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Asc)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Desc)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `<expression> <direction>` for this ordering against `registry`.
    pub fn render(&self, registry: &QueryPropertyRegistry, alias: Option<&str>) -> Result<String> {
        let property = registry.get(&self.property)?;
        Ok(format!("{} {}", property.render(alias), self.direction))
    }
}

/// Render an `ORDER BY` fragment list. Every property must be known to
/// `registry`; the first unknown one fails the whole render.
pub fn render_order_by(
    orderings: &[QueryOrdering],
    registry: &QueryPropertyRegistry,
    alias: Option<&str>,
) -> Result<String> {
    let parts = orderings
        .iter()
        .map(|ordering| ordering.render(registry, alias))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(", "))
}
