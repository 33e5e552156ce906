//! Property-based tests for page arithmetic

use proptest::prelude::*;
use youter::shared::pagination::{PageParams, Paginated, MAX_LIMIT};

proptest! {
    #[test]
    fn test_params_always_in_range(page in any::<Option<u32>>(), limit in any::<Option<u32>>()) {
        let params = PageParams::new(page, limit);
        prop_assert!(params.page >= 1);
        prop_assert!((1..=MAX_LIMIT).contains(&params.limit));
        prop_assert!(params.offset() >= 0);
    }

    #[test]
    fn test_offset_steps_by_limit(page in 1u32..10_000, limit in 1u32..=MAX_LIMIT) {
        let current = PageParams::new(Some(page), Some(limit));
        let next = PageParams::new(Some(page + 1), Some(limit));
        prop_assert_eq!(next.offset() - current.offset(), limit as i64);
    }

    #[test]
    fn test_navigation_flags(
        total in 0u64..5_000,
        page in 1u32..200,
        limit in 1u32..=MAX_LIMIT,
    ) {
        let result: Paginated<()> = Paginated::new(Vec::new(), total, PageParams::new(Some(page), Some(limit)));

        prop_assert_eq!(result.has_next_page, (page as u64) < result.total_pages);
        prop_assert_eq!(result.has_prev_page, page > 1);
        prop_assert_eq!(result.next_page.is_some(), result.has_next_page);
        prop_assert_eq!(result.prev_page.is_some(), result.has_prev_page);
        prop_assert!(result.total_pages * limit as u64 >= total);
        prop_assert!(result.total_pages * (limit as u64) < total + limit as u64);
    }
}
