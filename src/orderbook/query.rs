//! Validated query parameters for the order book views

use crate::error::{DashboardError, Result};

/// Bounds applied to caller-supplied row limits
#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: 300,
            max_limit: 10_000,
        }
    }
}

impl QueryLimits {
    /// Missing limits take the default, non-positive limits are rejected and
    /// oversized ones are clamped.
    pub fn resolve(&self, requested: Option<i64>) -> Result<i64> {
        match requested {
            None => Ok(self.default_limit.min(self.max_limit)),
            Some(limit) if limit <= 0 => Err(DashboardError::InvalidQuery(format!(
                "limit must be positive, got {}",
                limit
            ))),
            Some(limit) => Ok(limit.min(self.max_limit)),
        }
    }
}

/// Parameters of the latest order book view
#[derive(Debug, Clone, PartialEq)]
pub struct LatestQuery {
    pub limit: i64,
    /// Keyset cursor: only ticks with `time < before` are aggregated
    pub before: Option<String>,
}

impl LatestQuery {
    pub fn new(limits: &QueryLimits, limit: Option<i64>, before: Option<String>) -> Result<Self> {
        Ok(Self {
            limit: limits.resolve(limit)?,
            before: before.filter(|b| !b.is_empty()),
        })
    }
}

/// Parameters of the historical order book view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalQuery {
    pub limit: i64,
}

impl HistoricalQuery {
    pub fn new(limits: &QueryLimits, limit: Option<i64>) -> Result<Self> {
        Ok(Self {
            limit: limits.resolve(limit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limits() {
        let limits = QueryLimits::default();
        assert_eq!(limits.resolve(None).unwrap(), 300);
        assert_eq!(limits.resolve(Some(30)).unwrap(), 30);
        assert_eq!(limits.resolve(Some(50_000)).unwrap(), 10_000);
        assert!(matches!(
            limits.resolve(Some(0)),
            Err(DashboardError::InvalidQuery(_))
        ));
        assert!(limits.resolve(Some(-5)).is_err());
    }

    #[test]
    fn test_empty_before_is_absent() {
        let limits = QueryLimits::default();
        let query = LatestQuery::new(&limits, None, Some(String::new())).unwrap();
        assert_eq!(query.before, None);

        let query = LatestQuery::new(&limits, Some(10), Some("2025-06-11".into())).unwrap();
        assert_eq!(query.before.as_deref(), Some("2025-06-11"));
        assert_eq!(query.limit, 10);
    }
}
