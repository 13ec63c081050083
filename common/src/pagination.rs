//! Page-number strip shown under the listings, and the page plus row
//! selection a listing is browsed with.

use std::collections::BTreeSet;

use crate::requests::PageWindow;

/// Maximum page buttons rendered at once.
pub const MAX_VISIBLE_PAGES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    /// More pages exist after the last button.
    More,
}

pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Buttons for `current` (1-based): every page when there are few, otherwise a
/// window starting four pages back and shifted left near the end.
pub fn page_range(current: u64, total_items: u64, page_size: u64) -> Vec<PageItem> {
    let total = total_pages(total_items, page_size);
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(4).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total);
    let start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);

    let mut items: Vec<PageItem> = (start..=end).map(PageItem::Page).collect();
    if end < total {
        items.push(PageItem::More);
    }
    items
}

/// First and last item numbers shown on `current`, `(0, 0)` when empty.
pub fn item_bounds(current: u64, total_items: u64, page_size: u64) -> (u64, u64) {
    if total_items == 0 {
        return (0, 0);
    }
    let current = current.max(1);
    let first = (current - 1) * page_size + 1;
    let last = (current * page_size).min(total_items);
    (first, last)
}

/// Current page and checked rows of a listing.
///
/// Any change to what the listing shows goes through [`restart`] or
/// [`go_to`], both of which drop the selection, so batch actions only ever
/// see rows that are on screen.
///
/// [`restart`]: ListingCursor::restart
/// [`go_to`]: ListingCursor::go_to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCursor {
    page: u64,
    selected: BTreeSet<i64>,
}

impl Default for ListingCursor {
    fn default() -> Self {
        Self {
            page: 1,
            selected: BTreeSet::new(),
        }
    }
}

impl ListingCursor {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn window(&self, page_size: u64) -> PageWindow {
        PageWindow::new(self.page, page_size)
    }

    /// Back to the first page, e.g. after a new search, filter, tab or sort.
    pub fn restart(&mut self) {
        self.go_to(1);
    }

    pub fn go_to(&mut self, page: u64) {
        self.page = page.max(1);
        self.selected.clear();
    }

    pub fn selected(&self) -> &BTreeSet<i64> {
        &self.selected
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, id: i64, checked: bool) -> bool {
        if checked {
            self.selected.insert(id)
        } else {
            self.selected.remove(&id)
        }
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = i64>, checked: bool) {
        for id in ids {
            self.select(id, checked);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[PageItem]) -> Vec<u64> {
        items
            .iter()
            .filter_map(|i| match i {
                PageItem::Page(n) => Some(*n),
                PageItem::More => None,
            })
            .collect()
    }

    #[test]
    fn few_pages_are_all_listed() {
        let items = page_range(1, 120, 50);
        assert_eq!(items, vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]);
        assert_eq!(page_range(1, 0, 50), vec![PageItem::Page(1)]);
    }

    #[test]
    fn window_follows_current_page() {
        let items = page_range(12, 50 * 40, 50);
        assert_eq!(pages(&items), (8..=17).collect::<Vec<_>>());
        assert_eq!(items.last(), Some(&PageItem::More));
    }

    #[test]
    fn window_shifts_back_at_the_end() {
        let items = page_range(39, 50 * 40, 50);
        assert_eq!(pages(&items), (31..=40).collect::<Vec<_>>());
        assert_ne!(items.last(), Some(&PageItem::More));
    }

    #[test]
    fn bounds_clip_to_total() {
        assert_eq!(item_bounds(1, 0, 50), (0, 0));
        assert_eq!(item_bounds(1, 120, 50), (1, 50));
        assert_eq!(item_bounds(3, 120, 50), (101, 120));
        assert_eq!(total_pages(120, 50), 3);
    }

    #[test]
    fn changing_the_listing_drops_the_selection() {
        let mut cursor = ListingCursor::default();
        cursor.go_to(3);
        cursor.select_all([4, 8, 15], true);
        assert_eq!(cursor.selected_ids(), vec![4, 8, 15]);

        cursor.restart();
        assert_eq!(cursor.page(), 1);
        assert!(cursor.selected().is_empty());

        cursor.select(16, true);
        cursor.go_to(2);
        assert!(cursor.selected().is_empty());
        assert_eq!(cursor.window(50), PageWindow { skip: 50, limit: 50 });
    }

    #[test]
    fn selection_toggles_report_changes() {
        let mut cursor = ListingCursor::default();
        assert!(cursor.select(7, true));
        assert!(!cursor.select(7, true));
        cursor.select_all([7, 9], false);
        assert!(cursor.selected().is_empty());
        cursor.go_to(0);
        assert_eq!(cursor.page(), 1);
    }
}
