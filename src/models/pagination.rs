use serde::{Deserialize, Serialize};
use validator::Validate;

use super::todo_model::Todo;

/// Requested page, read from the `page` and `per_page` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct PaginationRequest {
    #[validate(range(min = 1, message = "page must be greater than or equal to 1"))]
    pub page: i64,

    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: i64,
}

impl PaginationRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Rows to skip, saturating at `i64::MAX` for pages far past any real table
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
    pub per_page: i64,
    pub total_pages_count: i64,
    pub total_count: i64,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub is_empty: bool,
}

impl PaginationMeta {
    /// Derives page navigation from the request and the counts returned by storage.
    ///
    /// An empty collection still has one (empty) page. The request is assumed
    /// to be validated, so `per_page` is positive.
    pub fn compute(
        request: &PaginationRequest,
        total_item_count: i64,
        current_page_item_count: usize,
    ) -> Self {
        let current_page = request.page;

        let total_pages_count = if total_item_count == 0 {
            1
        } else {
            (total_item_count - 1) / request.per_page + 1
        };

        let prev_page = current_page
            .checked_sub(1)
            .filter(|prev| (1..=total_pages_count).contains(prev));

        let next_page = current_page
            .checked_add(1)
            .filter(|next| *next <= total_pages_count);

        Self {
            current_page,
            prev_page,
            next_page,
            per_page: request.per_page,
            total_pages_count,
            total_count: total_item_count,
            is_first_page: request.page == 1,
            is_last_page: current_page == total_pages_count || total_pages_count == 0,
            is_empty: current_page_item_count == 0,
        }
    }
}

/// One page of todos together with its navigation metadata
#[derive(Debug, Serialize)]
pub struct TodoPage {
    pub meta: PaginationMeta,
    pub data: Vec<Todo>,
}

impl TodoPage {
    pub fn new(request: &PaginationRequest, data: Vec<Todo>, total_count: i64) -> Self {
        Self {
            meta: PaginationMeta::compute(request, total_count, data.len()),
            data,
        }
    }
}

#[cfg(test)]
mod pagination_test {
    use super::{PaginationMeta, PaginationRequest};
    use validator::Validate;

    #[test]
    fn test_first_of_three_pages() {
        let meta = PaginationMeta::compute(&PaginationRequest::new(1, 1), 3, 1);

        assert_eq!(meta.total_pages_count, 3);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, Some(2));
        assert_eq!(meta.is_first_page, true);
        assert_eq!(meta.is_last_page, false);
        assert_eq!(meta.is_empty, false);
    }

    #[test]
    fn test_middle_page_links_both_ways() {
        let meta = PaginationMeta::compute(&PaginationRequest::new(2, 10), 25, 10);

        assert_eq!(meta.total_pages_count, 3);
        assert_eq!(meta.prev_page, Some(1));
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.is_first_page, false);
        assert_eq!(meta.is_last_page, false);
    }

    #[test]
    fn test_last_partial_page() {
        let meta = PaginationMeta::compute(&PaginationRequest::new(3, 10), 25, 5);

        assert_eq!(meta.prev_page, Some(2));
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.is_last_page, true);
        assert_eq!(meta.total_count, 25);
        assert_eq!(meta.per_page, 10);
    }

    #[test]
    fn test_empty_collection_has_a_single_page() {
        let meta = PaginationMeta::compute(&PaginationRequest::new(1, 20), 0, 0);

        assert_eq!(meta.total_pages_count, 1);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.is_first_page, true);
        assert_eq!(meta.is_last_page, true);
        assert_eq!(meta.is_empty, true);
    }

    #[test]
    fn test_page_beyond_the_end() {
        // 2 pages in total, asking for page 5
        let meta = PaginationMeta::compute(&PaginationRequest::new(5, 10), 15, 0);

        assert_eq!(meta.total_pages_count, 2);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.is_last_page, false);
        assert_eq!(meta.is_empty, true);

        // page - 1 == total_pages_count still links back
        let meta = PaginationMeta::compute(&PaginationRequest::new(3, 10), 15, 0);
        assert_eq!(meta.prev_page, Some(2));
    }

    #[test]
    fn test_total_pages_is_ceiling_with_floor_of_one() {
        for total in 0..=250_i64 {
            for per_page in [1_i64, 3, 7, 10, 100] {
                let meta = PaginationMeta::compute(&PaginationRequest::new(1, per_page), total, 0);
                let expected = std::cmp::max(1, (total as f64 / per_page as f64).ceil() as i64);

                assert_eq!(meta.total_pages_count, expected, "total={} per_page={}", total, per_page);
            }
        }
    }

    #[test]
    fn test_navigation_links_follow_page_bounds() {
        for page in 1..=12_i64 {
            let meta = PaginationMeta::compute(&PaginationRequest::new(page, 10), 95, 0);

            let expected_prev = if page <= 1 || page - 1 > 10 { None } else { Some(page - 1) };
            let expected_next = if page + 1 > 10 { None } else { Some(page + 1) };

            assert_eq!(meta.prev_page, expected_prev, "page={}", page);
            assert_eq!(meta.next_page, expected_next, "page={}", page);
        }
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PaginationRequest::new(3, 25);

        assert_eq!(request.offset(), 50);
        assert_eq!(request.limit(), 25);
        assert_eq!(PaginationRequest::new(1, 10).offset(), 0);
    }

    #[test]
    fn test_largest_page_does_not_overflow() {
        let request = PaginationRequest::new(i64::MAX, 10);

        assert_eq!(request.offset(), i64::MAX);
        assert_eq!(request.limit(), 10);

        let meta = PaginationMeta::compute(&request, 3, 0);

        assert_eq!(meta.current_page, i64::MAX);
        assert_eq!(meta.total_pages_count, 1);
        assert_eq!(meta.prev_page, None);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.is_last_page, false);
        assert_eq!(meta.is_empty, true);

        let meta = PaginationMeta::compute(&PaginationRequest::new(1, 100), i64::MAX, 100);
        assert_eq!(meta.total_pages_count, i64::MAX / 100 + 1);
        assert_eq!(meta.next_page, Some(2));
    }

    #[test]
    fn test_request_validation_bounds() {
        assert_eq!(PaginationRequest::new(1, 1).validate().is_ok(), true);
        assert_eq!(PaginationRequest::new(1, 100).validate().is_ok(), true);
        assert_eq!(PaginationRequest::new(0, 10).validate().is_err(), true);
        assert_eq!(PaginationRequest::new(1, 0).validate().is_err(), true);
        assert_eq!(PaginationRequest::new(1, 101).validate().is_err(), true);
    }
}
