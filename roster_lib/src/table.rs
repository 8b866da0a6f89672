//! Paging, search, sort and filter state for one list view.
//!
//! [`TableState`] never talks to the network. A list page reads
//! [`TableState::query_params`] to build its request and feeds the reported
//! match count back through [`TableState::set_total_items`].

use std::collections::BTreeMap;

use roster_api::{ListQuery, Query, SortDirection};

use crate::error::RosterError;
use crate::pages::PageNumbers;

/// Search, sort, filter and paging intent of one list view.
///
/// `current_page` always lies in `1..=total_pages()`. Changing the search
/// term, the filters or the page size always returns to page 1, even when the
/// new value equals the old one. Changing the sort field does not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    current_page: i64,
    page_size: i64,
    total_items: i64,
    search_term: String,
    sort_by: Option<String>,
    sort_order: SortDirection,
    filters: BTreeMap<String, String>,
}

impl TableState {
    /// Creates a state on page 1 with no search, sort or filters.
    ///
    /// A non-positive `page_size` is raised to 1.
    pub fn new(page_size: i64) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            search_term: String::new(),
            sort_by: None,
            sort_order: SortDirection::Asc,
            filters: BTreeMap::new(),
        }
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_order(&self) -> SortDirection {
        self.sort_order
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// `max(1, ceil(total_items / page_size))`.
    pub fn total_pages(&self) -> i64 {
        let full = self.total_items / self.page_size;
        let partial = i64::from(self.total_items % self.page_size != 0);
        (full + partial).max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// 1-based index of the first item on the current page, 0 when there are none.
    pub fn range_start(&self) -> i64 {
        if self.total_items == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on the current page, 0 when there are none.
    pub fn range_end(&self) -> i64 {
        self.current_page
            .saturating_mul(self.page_size)
            .min(self.total_items)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Replaces the whole filter mapping. Callers wanting a partial update
    /// merge with [`TableState::filters`] first, or use [`TableState::set_filter`].
    pub fn set_filters(&mut self, filters: BTreeMap<String, String>) {
        self.filters = filters;
        self.current_page = 1;
    }

    /// Sets one filter, keeping the others.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        let mut filters = self.filters.clone();
        filters.insert(key.to_string(), value.to_string());
        self.set_filters(filters);
    }

    /// Drops every filter and the search term.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search_term.clear();
        self.current_page = 1;
    }

    /// Sorts by `field` ascending, or flips the order if `field` is already
    /// the sort field.
    pub fn set_sort_field(&mut self, field: &str) {
        if self.sort_by.as_deref() == Some(field) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = Some(field.to_string());
            self.sort_order = SortDirection::Asc;
        }
        tracing::debug!("sort by {} {}", field, self.sort_order);
    }

    pub fn clear_sort(&mut self) {
        self.sort_by = None;
        self.sort_order = SortDirection::Asc;
    }

    /// Moves to page `page`, clamped into `1..=total_pages()`. Returns whether
    /// the current page changed.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let page = page.clamp(1, self.total_pages());
        let changed = page != self.current_page;
        self.current_page = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        self.go_to_page(self.current_page - 1)
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    /// Replaces the page size and returns to page 1.
    pub fn change_page_size(&mut self, size: i64) -> Result<(), RosterError> {
        if size < 1 {
            return Err(RosterError::InvalidArgument(format!(
                "page size must be a positive integer, got {}",
                size
            )));
        }
        self.page_size = size;
        self.current_page = 1;
        Ok(())
    }

    /// Records the match count reported by the last fetch, pulling the
    /// current page back if it now lies past the end.
    pub fn set_total_items(&mut self, total: i64) -> Result<(), RosterError> {
        if total < 0 {
            return Err(RosterError::InvalidArgument(format!(
                "total items must not be negative, got {}",
                total
            )));
        }
        self.apply_total(total);
        Ok(())
    }

    pub(crate) fn apply_total(&mut self, total: i64) {
        self.total_items = total;
        let total_pages = self.total_pages();
        if self.current_page > total_pages {
            tracing::debug!(
                "page {} past the end after total {}, clamping to {}",
                self.current_page,
                total,
                total_pages
            );
            self.current_page = total_pages;
        }
    }

    /// Parameters for fetching the current page. Empty search and empty
    /// filter values are left out.
    pub fn query_params(&self) -> ListQuery {
        let mut query = ListQuery::default()
            .with_page(self.current_page)
            .with_page_size(self.page_size)
            .with_sort_direction(self.sort_order);
        if !self.search_term.is_empty() {
            query = query.with_search(&self.search_term);
        }
        if let Some(sort_by) = &self.sort_by {
            query = query.with_sort_by(sort_by);
        }
        for (key, value) in self.filters.iter().filter(|(_, v)| !v.is_empty()) {
            query = query.with_filter(key, value);
        }
        query
    }

    /// Compact page control for the current position: first and last page,
    /// a window around the current page, and ellipses for the gaps.
    pub fn visible_page_numbers(&self, max_visible: usize) -> PageNumbers {
        PageNumbers::new(self.current_page, self.total_pages(), max_visible)
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::pages::PageItem;

    fn state_with(page_size: i64, total: i64) -> TableState {
        let mut state = TableState::new(page_size);
        state.set_total_items(total).unwrap();
        state
    }

    #[test]
    fn new_state_is_blank() {
        let state = TableState::new(15);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), 15);
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.search_term(), "");
        assert_eq!(state.sort_by(), None);
        assert!(state.filters().is_empty());
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn new_raises_non_positive_page_size() {
        assert_eq!(TableState::new(0).page_size(), 1);
        assert_eq!(TableState::new(-4).page_size(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(state_with(10, 0).total_pages(), 1);
        assert_eq!(state_with(10, 10).total_pages(), 1);
        assert_eq!(state_with(10, 11).total_pages(), 2);
        assert_eq!(state_with(10, 95).total_pages(), 10);
    }

    #[test]
    fn go_to_page_clamps() {
        let mut state = state_with(10, 95);
        state.go_to_page(42);
        assert_eq!(state.current_page(), 10);
        state.go_to_page(-3);
        assert_eq!(state.current_page(), 1);
        state.go_to_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn navigation_is_a_no_op_at_the_edges() {
        let mut state = state_with(10, 25);
        assert!(!state.previous_page());
        assert!(!state.first_page());
        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.current_page(), 3);
        assert!(!state.next_page());
        assert!(!state.last_page());
        assert!(state.first_page());
        assert!(state.last_page());
        assert_eq!(state.current_page(), 3);
        assert!(state.previous_page());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn search_resets_page() {
        let mut state = state_with(10, 95);
        state.go_to_page(4);
        state.set_search_term("maria");
        assert_eq!(state.current_page(), 1);
        let query = state.query_params();
        assert_eq!(query.search.as_deref(), Some("maria"));
    }

    #[test]
    fn setters_reset_page_even_when_unchanged() {
        let mut state = state_with(10, 95);
        state.set_search_term("");
        state.go_to_page(5);
        state.set_search_term("");
        assert_eq!(state.current_page(), 1);

        state.go_to_page(5);
        state.set_filters(BTreeMap::new());
        assert_eq!(state.current_page(), 1);

        state.go_to_page(5);
        state.change_page_size(10).unwrap();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn sort_does_not_reset_page() {
        let mut state = state_with(10, 95);
        state.go_to_page(6);
        state.set_sort_field("religiousName");
        assert_eq!(state.current_page(), 6);
    }

    #[test]
    fn sort_field_toggles_between_two_orders() {
        let mut state = TableState::new(10);
        state.set_sort_field("name");
        assert_eq!(state.sort_by(), Some("name"));
        assert_eq!(state.sort_order(), SortDirection::Asc);
        state.set_sort_field("name");
        assert_eq!(state.sort_order(), SortDirection::Desc);
        state.set_sort_field("name");
        assert_eq!(state.sort_order(), SortDirection::Asc);
    }

    #[test]
    fn switching_sort_field_starts_ascending() {
        let mut state = TableState::new(10);
        state.set_sort_field("name");
        state.set_sort_field("name");
        state.set_sort_field("entryDate");
        assert_eq!(state.sort_by(), Some("entryDate"));
        assert_eq!(state.sort_order(), SortDirection::Asc);
        state.clear_sort();
        assert_eq!(state.sort_by(), None);
    }

    #[test]
    fn set_filters_replaces_instead_of_merging() {
        let mut state = TableState::new(10);
        state.set_filter("stage", "novice");
        state.set_filter("community", "7");
        assert_eq!(state.filters().len(), 2);

        let mut only_status = BTreeMap::new();
        only_status.insert("status".to_string(), "active".to_string());
        state.set_filters(only_status);
        assert_eq!(state.filters().len(), 1);
        assert!(state.filters().contains_key("status"));
    }

    #[test]
    fn clear_filters_is_idempotent() {
        let mut state = state_with(10, 95);
        state.set_filter("stage", "novice");
        state.set_search_term("clare");
        state.go_to_page(3);

        state.clear_filters();
        let once = state.clone();
        state.clear_filters();
        assert_eq!(state, once);
        assert_eq!(state.search_term(), "");
        assert!(state.filters().is_empty());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn change_page_size_rejects_non_positive() {
        let mut state = TableState::new(10);
        assert!(matches!(
            state.change_page_size(0),
            Err(RosterError::InvalidArgument(_))
        ));
        assert!(state.change_page_size(-1).is_err());
        assert_eq!(state.page_size(), 10);
    }

    #[test]
    fn set_total_items_rejects_negative() {
        let mut state = state_with(10, 30);
        assert!(matches!(
            state.set_total_items(-1),
            Err(RosterError::InvalidArgument(_))
        ));
        assert_eq!(state.total_items(), 30);
    }

    #[test]
    fn set_total_items_clamps_current_page() {
        let mut state = state_with(10, 100);
        state.go_to_page(5);
        state.set_total_items(12).unwrap();
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.current_page(), 2);

        state.set_total_items(0).unwrap();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn page_size_change_resets_rather_than_clamps() {
        let mut state = TableState::new(10);
        state.set_total_items(95).unwrap();
        assert_eq!(state.total_pages(), 10);
        state.go_to_page(10);
        assert_eq!(state.current_page(), 10);
        state.change_page_size(20).unwrap();
        assert_eq!(state.total_pages(), 5);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn range_covers_current_page() {
        let mut state = state_with(10, 95);
        assert_eq!((state.range_start(), state.range_end()), (1, 10));
        state.last_page();
        assert_eq!((state.range_start(), state.range_end()), (91, 95));
        let empty = TableState::new(10);
        assert_eq!((empty.range_start(), empty.range_end()), (0, 0));
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        let mut state = state_with(2, i64::MAX);
        state.last_page();
        assert_eq!(state.current_page(), i64::MAX / 2 + 1);
        assert_eq!(state.range_end(), i64::MAX);
        assert_eq!(state.range_start(), i64::MAX);

        let mut state = state_with(1, i64::MAX);
        state.last_page();
        let items: Vec<PageItem> = state.visible_page_numbers(5).collect();
        assert_eq!(items.last(), Some(&PageItem::Page(i64::MAX)));
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn query_params_skip_empty_values() {
        let mut state = TableState::new(20);
        state.set_filter("stage", "novice");
        state.set_filter("community", "");
        let query = state.query_params();
        assert_eq!(query.common.page, 1);
        assert_eq!(query.common.page_size, Some(20));
        assert_eq!(query.search, None);
        assert_eq!(query.sort_by, None);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters.get("stage").map(String::as_str), Some("novice"));
    }

    #[test]
    fn query_params_carry_sort() {
        let mut state = TableState::new(10);
        state.set_sort_field("lastName");
        state.set_sort_field("lastName");
        let pairs = state.query_params().to_pairs();
        assert!(pairs.contains(&("sortBy".to_string(), "lastName".to_string())));
        assert!(pairs.contains(&("sortOrder".to_string(), "desc".to_string())));
    }

    #[test]
    fn visible_page_numbers_follow_current_page() {
        let mut state = state_with(10, 200);
        state.go_to_page(10);
        let items: Vec<PageItem> = state.visible_page_numbers(5).collect();
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(8),
                PageItem::Page(9),
                PageItem::Page(10),
                PageItem::Page(11),
                PageItem::Page(12),
                PageItem::Ellipsis,
                PageItem::Page(20),
            ]
        );
    }

    proptest! {
        #[test]
        fn total_pages_formula(total in 0i64..1_000_000, page_size in 1i64..500) {
            let state = state_with(page_size, total);
            let expected = ((total + page_size - 1) / page_size).max(1);
            prop_assert_eq!(state.total_pages(), expected);
        }

        #[test]
        fn current_page_stays_in_range(
            total in 0i64..10_000,
            page_size in 1i64..100,
            jumps in proptest::collection::vec(any::<i64>(), 1..20),
        ) {
            let mut state = state_with(page_size, total);
            for jump in jumps {
                state.go_to_page(jump);
                prop_assert!(state.current_page() >= 1);
                prop_assert!(state.current_page() <= state.total_pages());
            }
        }

        #[test]
        fn shrinking_total_keeps_page_in_range(
            first in 0i64..10_000,
            second in 0i64..10_000,
            page in 1i64..1_000,
        ) {
            let mut state = state_with(10, first);
            state.go_to_page(page);
            state.set_total_items(second).unwrap();
            prop_assert!(state.current_page() >= 1);
            prop_assert!(state.current_page() <= state.total_pages());
        }
    }
}
