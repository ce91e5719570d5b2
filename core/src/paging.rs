//! Page bookkeeping: page index to offset, and page counts from `total`.

use std::num::NonZeroU64;

use crate::types::{Page, PageQuery};

pub const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(10) {
    Some(n) => n,
    None => panic!("page size must be non-zero"),
};

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [5, 10, 25, 100];

impl PageQuery {
    /// Query for the zero-based `page_index` at `page_size` items per page.
    pub fn for_page(page_index: u64, page_size: NonZeroU64) -> Self {
        Self::new(page_index.saturating_mul(page_size.get()), page_size)
    }
}

impl<T> Page<T> {
    /// Number of pages needed to show `total` items at `limit` per page.
    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    /// Zero-based index of this page.
    pub fn page_index(&self) -> u64 {
        self.skip.checked_div(self.limit).unwrap_or(0)
    }

    pub fn has_next(&self) -> bool {
        self.skip.saturating_add(self.items.len() as u64) < self.total
    }

    /// Query for the rows right after this page, if there are any.
    ///
    /// Continues from the last row received, so an offset that is not a
    /// multiple of `limit` never repeats rows.
    pub fn next_query(&self) -> Option<PageQuery> {
        if !self.has_next() {
            return None;
        }
        let limit = NonZeroU64::new(self.limit)?;
        let skip = self.skip.saturating_add(self.items.len() as u64);
        Some(PageQuery::new(skip, limit))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn page(len: usize, total: u64, skip: u64, limit: u64) -> Page<u8> {
        Page {
            items: vec![0; len],
            total,
            skip,
            limit,
        }
    }

    fn size(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(3, 10, 30)]
    #[case(2, 25, 50)]
    #[case(u64::MAX, 100, u64::MAX)]
    fn for_page_multiplies_index_by_size(#[case] index: u64, #[case] page_size: u64, #[case] skip: u64) {
        let query = PageQuery::for_page(index, size(page_size));
        assert_eq!(query.skip, skip);
        assert_eq!(query.limit.get(), page_size);
        assert!(query.sort.is_none());
    }

    #[rstest]
    #[case(194, 10, 20)]
    #[case(200, 10, 20)]
    #[case(0, 10, 0)]
    #[case(1, 100, 1)]
    fn page_count_rounds_up(#[case] total: u64, #[case] limit: u64, #[case] expected: u64) {
        assert_eq!(page(0, total, 0, limit).page_count(), expected);
    }

    #[test]
    fn last_short_page_has_no_next() {
        let last = page(4, 194, 190, 10);
        assert_eq!(last.page_index(), 19);
        assert!(!last.has_next());
        assert!(last.next_query().is_none());
    }

    #[test]
    fn next_query_advances_one_page() {
        let first = page(10, 194, 0, 10);
        let next = first.next_query().unwrap();
        assert_eq!(next.skip, 10);
        assert_eq!(next.limit.get(), 10);
    }

    #[test]
    fn next_query_continues_from_unaligned_offset() {
        let current = page(10, 40, 15, 10);
        let next = current.next_query().unwrap();
        assert_eq!(next.skip, 25);
        assert_eq!(next.limit.get(), 10);
    }

    #[test]
    fn default_page_size_is_an_option() {
        assert!(PAGE_SIZE_OPTIONS.contains(&DEFAULT_PAGE_SIZE.get()));
    }
}
