//! Cross-referencing executive orders with timeline items.
//!
//! Orders link to timeline items through the bridge key
//! ([`TimelineItem::bridge_key`]). A key that names no order is not an
//! error; it just never matches. All lookups here are linear scans.

use eodb_shared::{ExecutiveOrder, TimelineItem};

/// The first order whose document number equals `document_number`.
pub fn find_order<'a>(
    orders: &'a [ExecutiveOrder],
    document_number: &str,
) -> Option<&'a ExecutiveOrder> {
    orders.iter().find(|o| o.document_number == document_number)
}

/// Timeline items bridged to `document_number`, in source order.
pub fn timeline_for_order<'a>(
    items: &'a [TimelineItem],
    document_number: &str,
) -> Vec<&'a TimelineItem> {
    items
        .iter()
        .filter(|i| i.bridge_key() == Some(document_number))
        .collect()
}

/// Orders whose normalized agency list names `agency` exactly.
pub fn orders_for_agency<'a>(
    orders: &'a [ExecutiveOrder],
    agency: &str,
) -> Vec<&'a ExecutiveOrder> {
    orders.iter().filter(|o| o.has_agency(agency)).collect()
}

/// Timeline items assigned to `agency`, with `Immediate` items first.
pub fn timeline_for_agency<'a>(items: &'a [TimelineItem], agency: &str) -> Vec<&'a TimelineItem> {
    let mut matched: Vec<&TimelineItem> = items.iter().filter(|i| i.agency == agency).collect();
    sort_immediate_first(&mut matched);
    matched
}

/// Move `Immediate` items ahead of all others.
///
/// The ordering only distinguishes "Immediate" from everything else; the
/// stable sort keeps the input order within both groups.
pub fn sort_immediate_first(items: &mut [&TimelineItem]) {
    items.sort_by_key(|i| !i.is_immediate());
}
