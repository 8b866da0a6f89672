//! Compact page-number sequences for pagination controls.

use std::iter::FusedIterator;

/// One slot of a pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(i64),
    /// Stands for two or more skipped pages.
    Ellipsis,
}

impl std::fmt::Display for PageItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{}", page),
            PageItem::Ellipsis => write!(f, "…"),
        }
    }
}

/// Lazily yields the pages to show around `current`: always the first and
/// last page, every page within `delta` of `current`, a lone skipped page
/// in place of an ellipsis, and one [`PageItem::Ellipsis`] for any longer gap.
///
/// `delta` is `(max_visible - 1) / 2`, so a `max_visible` of 5 shows two
/// pages on each side of the current one.
#[derive(Clone, Debug)]
pub struct PageNumbers {
    total: i64,
    window_start: i64,
    window_end: i64,
    last: Option<i64>,
    queued: Option<i64>,
}

impl PageNumbers {
    pub fn new(current: i64, total_pages: i64, max_visible: usize) -> Self {
        let total = total_pages.max(1);
        let current = current.clamp(1, total);
        let delta = i64::try_from(max_visible.saturating_sub(1) / 2).unwrap_or(i64::MAX);
        Self {
            total,
            window_start: current.saturating_sub(delta).max(1),
            window_end: current.saturating_add(delta).min(total),
            last: None,
            queued: None,
        }
    }

    /// The next page that must be shown after `page`, if any.
    fn next_anchor(&self, page: i64) -> Option<i64> {
        let candidate = page.checked_add(1)?;
        if candidate < self.window_start {
            Some(self.window_start)
        } else if candidate <= self.window_end {
            Some(candidate)
        } else if page < self.total {
            Some(self.total)
        } else {
            None
        }
    }

    fn emit(&mut self, page: i64) -> Option<PageItem> {
        self.last = Some(page);
        Some(PageItem::Page(page))
    }
}

impl Iterator for PageNumbers {
    type Item = PageItem;

    fn next(&mut self) -> Option<PageItem> {
        if let Some(page) = self.queued.take() {
            return self.emit(page);
        }
        let Some(last) = self.last else {
            return self.emit(1);
        };
        let anchor = self.next_anchor(last)?;
        match anchor - last {
            1 => self.emit(anchor),
            2 => self.emit(last + 1),
            _ => {
                self.queued = Some(anchor);
                Some(PageItem::Ellipsis)
            }
        }
    }
}

impl FusedIterator for PageNumbers {}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(current: i64, total: i64, max_visible: usize) -> String {
        PageNumbers::new(current, total, max_visible)
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn middle_of_long_range() {
        assert_eq!(render(10, 20, 5), "1 … 8 9 10 11 12 … 20");
    }

    #[test]
    fn single_page() {
        assert_eq!(render(1, 1, 5), "1");
    }

    #[test]
    fn near_the_start() {
        assert_eq!(render(1, 20, 5), "1 2 3 … 20");
        assert_eq!(render(3, 20, 5), "1 2 3 4 5 … 20");
    }

    #[test]
    fn near_the_end() {
        assert_eq!(render(20, 20, 5), "1 … 18 19 20");
        assert_eq!(render(17, 20, 5), "1 … 15 16 17 18 19 20");
    }

    #[test]
    fn single_gap_is_filled_with_the_page() {
        // window 3..=7, page 2 is the only one missing before it
        assert_eq!(render(5, 20, 5), "1 2 3 4 5 6 7 … 20");
        // window 14..=18, page 19 is the only one missing after it
        assert_eq!(render(16, 20, 5), "1 … 14 15 16 17 18 19 20");
    }

    #[test]
    fn short_ranges_have_no_ellipsis() {
        assert_eq!(render(3, 6, 5), "1 2 3 4 5 6");
        assert_eq!(render(2, 2, 5), "1 2");
    }

    #[test]
    fn max_visible_controls_window() {
        assert_eq!(render(10, 20, 1), "1 … 10 … 20");
        assert_eq!(render(10, 20, 3), "1 … 9 10 11 … 20");
        assert_eq!(render(10, 20, 0), "1 … 10 … 20");
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(render(99, 4, 5), "1 2 3 4");
        assert_eq!(render(0, 4, 5), "1 2 3 4");
    }

    #[test]
    fn never_two_ellipses_in_a_row() {
        for total in 1..40 {
            for current in 1..=total {
                for max_visible in 0..9 {
                    let items: Vec<PageItem> =
                        PageNumbers::new(current, total, max_visible).collect();
                    assert_eq!(items.first(), Some(&PageItem::Page(1)));
                    assert_eq!(items.last(), Some(&PageItem::Page(total)));
                    assert!(items
                        .windows(2)
                        .all(|w| !(w[0] == PageItem::Ellipsis && w[1] == PageItem::Ellipsis)));
                    let pages: Vec<i64> = items
                        .iter()
                        .filter_map(|item| match item {
                            PageItem::Page(p) => Some(*p),
                            PageItem::Ellipsis => None,
                        })
                        .collect();
                    assert!(pages.windows(2).all(|w| w[0] < w[1]));
                    assert!(pages.contains(&current));
                }
            }
        }
    }

    #[test]
    fn last_page_at_i64_max() {
        let items: Vec<PageItem> = PageNumbers::new(i64::MAX, i64::MAX, 5).collect();
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(i64::MAX - 2),
                PageItem::Page(i64::MAX - 1),
                PageItem::Page(i64::MAX),
            ]
        );
    }

    #[test]
    fn iterator_is_fused() {
        let mut pages = PageNumbers::new(1, 1, 5);
        assert_eq!(pages.next(), Some(PageItem::Page(1)));
        assert_eq!(pages.next(), None);
        assert_eq!(pages.next(), None);
    }
}
