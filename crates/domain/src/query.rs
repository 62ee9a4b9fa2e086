//! Listing query — pagination window plus an optional status filter.

/// Which devices to list and which slice of them to return.
///
/// Results come back in the backend's natural order; `skip` and `limit`
/// apply after the status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceQuery {
    /// Number of matching records to skip.
    pub skip: u32,
    /// Maximum number of records to return; `0` means no limit.
    pub limit: u32,
    /// Only return devices whose status equals this value.
    pub status: Option<String>,
}

impl DeviceQuery {
    /// Build a query from raw listing parameters.
    ///
    /// An empty `status` applies no status predicate.
    #[must_use]
    pub fn new(skip: u32, limit: u32, status: &str) -> Self {
        Self {
            skip,
            limit,
            status: (!status.is_empty()).then(|| status.to_string()),
        }
    }

    /// The limit as an `Option`, `None` meaning unbounded.
    #[must_use]
    pub fn max_results(&self) -> Option<u32> {
        (self.limit != 0).then_some(self.limit)
    }

    /// `true` when `status` passes this query's status filter.
    #[must_use]
    pub fn matches_status(&self, status: &str) -> bool {
        self.status.as_deref().is_none_or(|wanted| wanted == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_drop_status_filter_when_empty() {
        let query = DeviceQuery::new(0, 10, "");
        assert!(query.status.is_none());
        assert!(query.matches_status("pending"));
        assert!(query.matches_status(""));
    }

    #[test]
    fn should_match_only_equal_status_when_filtered() {
        let query = DeviceQuery::new(0, 10, "pending");
        assert!(query.matches_status("pending"));
        assert!(!query.matches_status("accepted"));
        assert!(!query.matches_status(""));
    }

    #[test]
    fn should_treat_zero_limit_as_unbounded() {
        assert_eq!(DeviceQuery::new(5, 0, "").max_results(), None);
        assert_eq!(DeviceQuery::new(5, 3, "").max_results(), Some(3));
    }
}
