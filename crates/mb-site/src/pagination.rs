//! Pagination window math.
//!
//! Listing pages paginate server-side. [`Pagination::build`] turns a result
//! total into the numbered-page widget data: previous/next targets and a
//! window of page numbers with gaps, so long listings never render hundreds
//! of links.

/// How many pages to show on each side of the current page.
const WINDOW: u64 = 2;

/// One slot in the rendered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A numbered page link (or the current page).
    Page(u64),
    /// An elided run of pages, rendered as an ellipsis.
    Gap,
}

/// Pagination widget data for one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Current 1-based page, clamped into range.
    pub current: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u64,
    /// Previous page number, if any.
    pub prev: Option<u64>,
    /// Next page number, if any.
    pub next: Option<u64>,
    /// Windowed page slots: first, gap, window around current, gap, last.
    pub pages: Vec<PageItem>,
}

impl Pagination {
    /// Build widget data from a requested page, page size and result total.
    ///
    /// `per_page` of 0 is treated as 1. A requested page beyond the last is
    /// clamped to the last page; page 0 is clamped to 1.
    #[must_use]
    pub fn build(requested: u64, per_page: u64, total_records: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_records.div_ceil(per_page).max(1);
        let current = requested.clamp(1, total_pages);

        let low = current.saturating_sub(WINDOW).max(1);
        let high = (current + WINDOW).min(total_pages);

        let mut pages = Vec::new();
        if low > 1 {
            pages.push(PageItem::Page(1));
            if low > 2 {
                pages.push(PageItem::Gap);
            }
        }
        for page in low..=high {
            pages.push(PageItem::Page(page));
        }
        if high < total_pages {
            if high + 1 < total_pages {
                pages.push(PageItem::Gap);
            }
            pages.push(PageItem::Page(total_pages));
        }

        Self {
            current,
            total_pages,
            prev: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
            pages,
        }
    }

    /// Whether the widget is worth rendering at all.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.total_pages <= 1
    }
}
