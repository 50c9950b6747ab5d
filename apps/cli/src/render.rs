//! Plain-text rendering for `--output text`.

use std::fmt::Write;

use eodb_core::{AgencyView, Facets, FilteredPage, OrderDetail, PageLink, Pager};
use eodb_shared::{ExecutiveOrder, FilterState, TimelineItem};

/// One page of orders with a filter summary and page strip.
pub(crate) fn list(page: &FilteredPage, pager: &Pager, state: &FilterState) -> String {
    let mut out = String::new();

    if page.is_empty() {
        let _ = writeln!(out, "\n  No executive orders match the current filters.");
        if state.is_filtering() {
            let _ = writeln!(out, "  Try removing --agency, --category or --search.");
        }
        let _ = writeln!(out);
        return out;
    }

    let _ = writeln!(
        out,
        "\n  Showing {} of {} executive orders{}",
        page.total_filtered,
        page.total_records,
        filter_summary(state)
    );
    let _ = writeln!(out, "  {}", "-".repeat(60));

    if page.items.is_empty() {
        let _ = writeln!(
            out,
            "  Page {} is past the end ({} pages).",
            page.page, page.total_pages
        );
    }
    for order in &page.items {
        write_order_line(&mut out, order);
    }

    let _ = writeln!(
        out,
        "\n  Page {} of {}  {}",
        page.page,
        page.total_pages,
        page_strip(pager, page.page)
    );
    let _ = writeln!(out);
    out
}

/// An order's fields followed by its timeline.
pub(crate) fn detail(detail: &OrderDetail<'_>) -> String {
    let order = detail.order;
    let mut out = String::new();

    let _ = writeln!(out, "\n  {}", order.display_title());
    let _ = writeln!(out, "  {}", "=".repeat(60));
    let _ = writeln!(out, "  Document:   {}", order.document_number);
    let _ = writeln!(out, "  Agencies:   {}", join_or_dash(&order.agencies));
    let _ = writeln!(out, "  Categories: {}", join_or_dash(&order.categories));
    if let Some(url) = &order.html_url {
        let _ = writeln!(out, "  Link:       {url}");
    }

    let _ = writeln!(out, "\n  Timeline");
    let _ = writeln!(out, "  {}", "-".repeat(60));
    if detail.timeline.is_empty() {
        let _ = writeln!(out, "  No timeline items recorded for this order.");
    }
    for item in &detail.timeline {
        write_timeline_line(&mut out, item);
    }
    let _ = writeln!(out);
    out
}

/// The orders naming an agency and its required actions.
pub(crate) fn agency(view: &AgencyView<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n  {}", view.agency);
    let _ = writeln!(out, "  {}", "=".repeat(60));

    if view.is_empty() {
        let _ = writeln!(out, "  No orders or actions found for this agency.");
        let _ = writeln!(out, "  Run `eodb facets` to list known agency names.\n");
        return out;
    }

    let _ = writeln!(out, "\n  Executive orders ({})", view.orders.len());
    let _ = writeln!(out, "  {}", "-".repeat(60));
    if view.orders.is_empty() {
        let _ = writeln!(out, "  None.");
    }
    for order in &view.orders {
        write_order_line(&mut out, order);
    }

    let _ = writeln!(out, "\n  Required actions ({})", view.timeline.len());
    let _ = writeln!(out, "  {}", "-".repeat(60));
    if view.timeline.is_empty() {
        let _ = writeln!(out, "  None.");
    }
    for item in &view.timeline {
        write_timeline_line(&mut out, item);
    }
    let _ = writeln!(out);
    out
}

pub(crate) fn timeline(items: &[&TimelineItem]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        let _ = writeln!(out, "\n  No timeline items loaded.\n");
        return out;
    }
    let _ = writeln!(out);
    for item in items {
        write_timeline_line(&mut out, item);
    }
    let _ = writeln!(out);
    out
}

pub(crate) fn facets(facets: &Facets) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n  Agencies ({})", facets.agencies.len());
    for agency in &facets.agencies {
        let _ = writeln!(out, "    {agency}");
    }
    let _ = writeln!(out, "\n  Categories ({})", facets.categories.len());
    for category in &facets.categories {
        let _ = writeln!(out, "    {category}");
    }
    let _ = writeln!(out);
    out
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_order_line(out: &mut String, order: &ExecutiveOrder) {
    let _ = writeln!(
        out,
        "  {:<12} {}",
        order.document_number,
        order.display_title()
    );
    if !order.agencies.is_empty() {
        let _ = writeln!(out, "  {:<12} {}", "", order.agencies.join(", "));
    }
}

fn write_timeline_line(out: &mut String, item: &TimelineItem) {
    let due = item.due_date.as_deref().unwrap_or("-");
    let key = item.bridge_key().unwrap_or("?");
    let _ = writeln!(out, "  [{due:<10}] {} ({key})", item.agency);
    let _ = writeln!(out, "  {:<12} {}", "", item.action);
}

fn filter_summary(state: &FilterState) -> String {
    let mut parts = Vec::new();
    if let Some(agency) = state.active_agency() {
        parts.push(format!("agency={agency}"));
    }
    if let Some(category) = state.active_category() {
        parts.push(format!("category={category}"));
    }
    if let Some(search) = state.active_search() {
        parts.push(format!("search={search:?}"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Page links with `requested` in brackets. A requested page outside the
/// window gets no marker.
fn page_strip(pager: &Pager, requested: usize) -> String {
    pager
        .window()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == requested => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
