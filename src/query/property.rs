use serde::{Deserialize, Serialize};
use std::fmt;

/// One sortable/filterable attribute of a query domain.
///
/// `name` is the stable logical identifier API consumers sort and filter
/// by. `locator` is the physical storage reference it maps to and is only
/// meaningful to the storage layer. An optional `function` wraps the locator
/// when rendered, e.g. `LOWER` for case-insensitive ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryProperty {
    name: String,
    locator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function: Option<String>,
}

impl QueryProperty {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            function: None,
        }
    }

    /// Wrap the locator in a storage function when rendered.
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Storage expression for this property, qualified by `alias` if given.
    ///
    /// ```
    /// use bpm_query_core::QueryProperty;
    ///
    /// let name = QueryProperty::new("NAME_CASE_INSENSITIVE", "NAME_").with_function("LOWER");
    /// assert_eq!(name.render(Some("RES")), "LOWER(RES.NAME_)");
    /// assert_eq!(QueryProperty::new("ID", "ID_").render(None), "ID_");
    /// ```
    pub fn render(&self, alias: Option<&str>) -> String {
        let column = match alias {
            Some(alias) if !alias.is_empty() => format!("{}.{}", alias, self.locator),
            _ => self.locator.clone(),
        };

        match &self.function {
            Some(function) => format!("{}({})", function, column),
            None => column,
        }
    }
}

impl fmt::Display for QueryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.render(None))
    }
}
