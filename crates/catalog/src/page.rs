/// Maximum number of page buttons the navigation window shows.
pub const PAGE_WINDOW: usize = 5;

/// Result of slicing a filtered sequence into one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Total page count; at least 1 even for an empty sequence.
    pub total_pages: usize,
    /// The requested page clamped into `[1, total_pages]`.
    pub effective_page: usize,
    /// Index range of the page within the filtered sequence.
    pub range: core::ops::Range<usize>,
}

impl Page {
    /// Apply the computed range to the sequence it was derived from.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range.clone()]
    }
}

/// Compute the page slice for a filtered sequence of length `len`.
///
/// An empty sequence yields a valid page 1 with an empty range rather
/// than zero pages, so the view never has to special-case it.
pub fn paginate(len: usize, page_size: usize, requested_page: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = len.div_ceil(page_size).max(1);
    let effective_page = requested_page.clamp(1, total_pages);

    let start = ((effective_page - 1) * page_size).min(len);
    let end = (start + page_size).min(len);

    Page {
        total_pages,
        effective_page,
        range: start..end,
    }
}

/// Select the page numbers to show as navigation buttons: at most
/// [`PAGE_WINDOW`] of them, centered on the current page when possible
/// and clamped at both ends of the range.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let current = current.clamp(1, total.max(1));

    if total <= PAGE_WINDOW {
        (1..=total).collect()
    } else if current <= 3 {
        (1..=PAGE_WINDOW).collect()
    } else if current >= total - 2 {
        (total - (PAGE_WINDOW - 1)..=total).collect()
    } else {
        (current - 2..=current + 2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_yields_one_empty_page() {
        let page = paginate(0, 10, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.effective_page, 1);
        assert_eq!(page.range, 0..0);
    }

    #[test]
    fn partial_last_page_has_the_remainder() {
        // 23 items at page size 10: page 3 holds the trailing 3.
        let page = paginate(23, 10, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.effective_page, 3);
        assert_eq!(page.range, 20..23);
    }

    #[test]
    fn requested_page_is_clamped_at_both_ends() {
        let high = paginate(23, 10, 99);
        assert_eq!(high.effective_page, 3);
        assert_eq!(high.range, 20..23);

        let low = paginate(23, 10, 0);
        assert_eq!(low.effective_page, 1);
        assert_eq!(low.range, 0..10);
    }

    #[test]
    fn slice_returns_the_page_contents() {
        let items: Vec<u32> = (0..23).collect();
        let page = paginate(items.len(), 10, 2);
        assert_eq!(page.slice(&items), &items[10..20]);
    }

    #[test]
    fn window_shows_all_pages_when_few() {
        assert_eq!(page_window(2, 4), vec![1, 2, 3, 4]);
        assert_eq!(page_window(1, 1), vec![1]);
    }

    #[test]
    fn window_clamps_at_the_start() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_clamps_at_the_end() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_centers_in_the_middle() {
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: concatenating all page slices reconstructs the
            /// sequence exactly once.
            #[test]
            fn pages_partition_the_sequence(len in 0usize..200, page_size in 1usize..20) {
                let items: Vec<usize> = (0..len).collect();
                let total = paginate(len, page_size, 1).total_pages;

                let mut rebuilt = Vec::new();
                for page_no in 1..=total {
                    let page = paginate(len, page_size, page_no);
                    prop_assert_eq!(page.effective_page, page_no);
                    rebuilt.extend_from_slice(page.slice(&items));
                }
                prop_assert_eq!(rebuilt, items);
            }

            /// Property: the window never exceeds five buttons, always
            /// contains the current page, and is contiguous.
            #[test]
            fn window_is_bounded_contiguous_and_contains_current(
                total in 1usize..60,
                current in 1usize..60,
            ) {
                let current = current.min(total);
                let window = page_window(current, total);

                prop_assert!(window.len() <= PAGE_WINDOW);
                prop_assert!(window.contains(&current));
                prop_assert!(window.first().is_some_and(|&f| f >= 1));
                prop_assert!(window.last().is_some_and(|&l| l <= total));
                for pair in window.windows(2) {
                    prop_assert_eq!(pair[1], pair[0] + 1);
                }
            }
        }
    }
}
