//! Keyset pagination parameters.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Cursor pagination parameters.
///
/// Pages are read newest first. To get the next page, pass the smallest
/// id of the current page as `prev_id`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct CursorParams {
    /// Only return elements with an id below this one. Absent or 0 starts at the newest.
    #[validate(range(min = 0))]
    prev_id: Option<i64>,
    /// The number of elements per page. Absent or 0 means 5.
    #[validate(range(min = 0))]
    size: Option<i64>,
}

impl CursorParams {
    pub fn new(prev_id: Option<i64>, size: Option<i64>) -> Self {
        Self { prev_id, size }
    }

    /// The exclusive upper bound on ids, where 0 means no bound.
    pub fn cursor(&self) -> i64 {
        self.prev_id.unwrap_or(0)
    }

    pub fn page_size(&self) -> i64 {
        match self.size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_at_newest_with_five() {
        let params = CursorParams::default();
        assert_eq!(0, params.cursor());
        assert_eq!(DEFAULT_PAGE_SIZE, params.page_size());
    }

    #[test]
    fn zero_size_means_default() {
        assert_eq!(DEFAULT_PAGE_SIZE, CursorParams::new(Some(3), Some(0)).page_size());
        assert_eq!(2, CursorParams::new(Some(3), Some(2)).page_size());
    }

    #[test]
    fn negative_values_are_invalid() {
        assert!(CursorParams::new(Some(-1), None).validate().is_err());
        assert!(CursorParams::new(None, Some(-5)).validate().is_err());
        assert!(CursorParams::new(Some(10), Some(5)).validate().is_ok());
    }
}
