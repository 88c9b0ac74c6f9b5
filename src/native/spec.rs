use crate::core::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination window of a native query.
///
/// `max_results = None` means unbounded. `usize::MAX` is accepted as the
/// unbounded sentinel and normalized to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub first_result: usize,
    pub max_results: Option<usize>,
}

impl Page {
    pub const UNBOUNDED: usize = usize::MAX;

    pub fn new(first_result: usize, max_results: usize) -> Self {
        Self {
            first_result,
            max_results: (max_results != Self::UNBOUNDED).then_some(max_results),
        }
    }

    /// Everything from the first row on.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_results.is_none()
    }

    /// Apply this window to rows that are already in result order.
    ///
    /// Convenience for managers that evaluate statements in memory.
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        let rows = rows.into_iter().skip(self.first_result);
        match self.max_results {
            Some(max) => rows.take(max).collect(),
            None => rows.collect(),
        }
    }
}

/// Statement plus bound parameters, handed to a domain manager as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativeQueryRequest {
    pub statement: String,
    pub parameters: BTreeMap<String, Value>,
}

impl NativeQueryRequest {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}

/// One raw-query request: what to run, against which domain, and which window.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeQuerySpec {
    pub domain: &'static str,
    pub request: NativeQueryRequest,
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_means_unbounded() {
        assert!(Page::new(3, Page::UNBOUNDED).is_unbounded());
        assert_eq!(Page::new(3, 10).max_results, Some(10));
        assert_eq!(Page::all(), Page::new(0, usize::MAX));
    }

    #[test]
    fn test_slice_skips_and_limits() {
        let rows: Vec<i32> = (1..=6).collect();
        assert_eq!(Page::new(2, 3).slice(rows.clone()), vec![3, 4, 5]);
        assert_eq!(Page::new(4, Page::UNBOUNDED).slice(rows.clone()), vec![5, 6]);
        assert!(Page::new(10, 2).slice(rows.clone()).is_empty());
        assert!(Page::new(0, 0).slice(rows).is_empty());
    }

    #[test]
    fn test_request_parameters_survive_json() {
        let mut request = NativeQueryRequest::new("SELECT * FROM ACT_HI_JOB_LOG WHERE ID_ = #{id}");
        request
            .parameters
            .insert("id".into(), Value::Text("2024-05-01T12:00:00Z".into()));
        request.parameters.insert("retries".into(), Value::Integer(3));

        let json = serde_json::to_string(&request).unwrap();
        let restored: NativeQueryRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, request);
        assert_eq!(restored.parameter("id").map(Value::type_name), Some("TEXT"));
    }
}
