//! Sorting, page slicing, and page navigation.

use std::cmp::Ordering;

use eodb_shared::{ExecutiveOrder, FilterState};
use serde::Serialize;

use crate::filter::apply_filters;

/// Records per page in every list view.
pub const PAGE_SIZE: usize = 12;

/// One page of a filtered, sorted order list.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredPage {
    /// Records on the requested page.
    pub items: Vec<ExecutiveOrder>,
    /// The requested 1-based page index.
    pub page: usize,
    pub page_size: usize,
    /// Records matching the filter across all pages.
    pub total_filtered: usize,
    /// Records in the unfiltered collection.
    pub total_records: usize,
    /// `0` when nothing matched.
    pub total_pages: usize,
}

impl FilteredPage {
    /// Whether the filter matched nothing at all.
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}

/// Newest-first ordering: descending lexicographic document numbers.
///
/// Document numbers are `YYYY-NNNNN`, so string order is chronological.
pub fn newest_first(a: &ExecutiveOrder, b: &ExecutiveOrder) -> Ordering {
    b.document_number.cmp(&a.document_number)
}

/// Sort in place with [`newest_first`]. Stable for equal numbers.
pub fn sort_by_document_number_desc(orders: &mut [&ExecutiveOrder]) {
    orders.sort_by(|a, b| newest_first(a, b));
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// The items on 1-based `page`, clipped to the slice bounds.
///
/// Page 0 and pages past the end are empty, not errors.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Filter, sort and slice with the standard [`PAGE_SIZE`].
pub fn filter_and_paginate(orders: &[ExecutiveOrder], state: &FilterState) -> FilteredPage {
    filter_and_paginate_with(orders, state, PAGE_SIZE)
}

/// Filter, sort and slice with an explicit page size.
pub fn filter_and_paginate_with(
    orders: &[ExecutiveOrder],
    state: &FilterState,
    page_size: usize,
) -> FilteredPage {
    let mut filtered = apply_filters(orders, state);
    sort_by_document_number_desc(&mut filtered);

    FilteredPage {
        items: page_slice(&filtered, state.current_page, page_size)
            .iter()
            .map(|o| (*o).clone())
            .collect(),
        page: state.current_page,
        page_size,
        total_filtered: filtered.len(),
        total_records: orders.len(),
        total_pages: total_pages(filtered.len(), page_size),
    }
}

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Page navigation over `1..=total_pages`.
///
/// With `total_pages == 0` there is no valid page: `current` stays 1 but
/// every transition is refused and [`Pager::is_empty`] tells the view to
/// render its empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total_pages: usize,
}

impl Pager {
    /// Start at `current`, clamped into the valid range.
    pub fn new(current: usize, total_pages: usize) -> Self {
        let current = current.clamp(1, total_pages.max(1));
        Self {
            current,
            total_pages,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1 && !self.is_empty()
    }

    /// Advance one page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one page. Returns false at the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to `page` if it exists.
    pub fn jump_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages {
            return false;
        }
        self.current = page;
        true
    }

    /// Page links around the current page: the first, the last, and the
    /// current page with its neighbours, with [`PageLink::Gap`] wherever
    /// numbers are skipped.
    pub fn window(&self) -> Vec<PageLink> {
        let mut links = Vec::new();
        let mut last_shown = 0;

        for number in 1..=self.total_pages {
            let near_current = number + 1 >= self.current && number <= self.current + 1;
            if number != 1 && number != self.total_pages && !near_current {
                continue;
            }
            if last_shown != 0 && number - last_shown > 1 {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(number));
            last_shown = number;
        }

        links
    }
}

/// An entry in a page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Gap,
}
