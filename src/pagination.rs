//! Fixed-size pages and the ellipsis-collapsed page-number window.

use serde::Serialize;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default number of consecutive page numbers shown in navigation.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// One entry in the page navigation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "page")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Splits an ordered sequence into pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator. A zero page size is raised to one.
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `ceil(count / page_size)`, zero for an empty sequence.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// Clamps a requested page into `[1, max(1, total_pages)]`.
    pub fn clamp_page(&self, page: usize, count: usize) -> usize {
        page.clamp(1, self.total_pages(count).max(1))
    }

    /// Returns the items on a 1-indexed page.
    ///
    /// Pages outside `[1, max(1, total_pages)]` are rejected with `None`;
    /// page 1 of an empty sequence is the empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> Option<&'a [T]> {
        let last = self.total_pages(items.len()).max(1);
        if page == 0 || page > last {
            return None;
        }

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        Some(&items[start.min(end)..end])
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Computes the page-number window for navigation controls.
///
/// Shows up to `max_visible` consecutive pages centered on `current`, always
/// including the first and last page, with an ellipsis wherever the run does
/// not touch them.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }

    let max_visible = max_visible.clamp(1, total);
    let current = current.clamp(1, total);

    let start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    let start = (end + 1).saturating_sub(max_visible).max(1);

    let mut window = Vec::with_capacity(max_visible.saturating_add(4));

    if start > 1 {
        window.push(PageItem::Page(1));
        if start > 2 {
            window.push(PageItem::Ellipsis);
        }
    }

    window.extend((start..=end).map(PageItem::Page));

    if end < total {
        if end < total - 1 {
            window.push(PageItem::Ellipsis);
        }
        window.push(PageItem::Page(total));
    }

    window
}
