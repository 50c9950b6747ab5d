//! Mapping from raw CSV records to typed domain records.

use std::path::Path;

use eodb_shared::{ExecutiveOrder, Result, TimelineItem};
use tracing::{debug, info, instrument};

use crate::csv_table::{RawRecord, load_table};
use crate::normalize::split_optional;

// Executive orders table columns.
const DOCUMENT_NUMBER: &str = "document_number";
const TITLE: &str = "title";
const AGENCIES: &str = "agencies";
const CATEGORIES: &str = "categories";
const HTML_URL: &str = "html_url";

// Timelines table columns.
const DOCUMENT_NUMBER_BRIDGE: &str = "document_number_bridge";
const AGENCY: &str = "agency";
const ACTION: &str = "action";
const DUE_DATE: &str = "due_date";

/// Build an [`ExecutiveOrder`] from a raw record.
///
/// Returns `None` when the row carries no document number, since such a
/// row can be neither linked nor sorted.
pub fn executive_order_from_record(record: &RawRecord) -> Option<ExecutiveOrder> {
    let field = |name: &str| record.get(name).map(String::as_str);

    Some(ExecutiveOrder {
        document_number: field(DOCUMENT_NUMBER)?.to_string(),
        title: field(TITLE).unwrap_or_default().to_string(),
        agencies: split_optional(field(AGENCIES)),
        categories: split_optional(field(CATEGORIES)),
        agencies_raw: field(AGENCIES).unwrap_or_default().to_string(),
        categories_raw: field(CATEGORIES).unwrap_or_default().to_string(),
        html_url: record.get(HTML_URL).cloned(),
    })
}

/// Build a [`TimelineItem`] from a raw record.
///
/// Known columns are lifted into fields; everything else lands in
/// [`TimelineItem::extra`].
pub fn timeline_item_from_record(mut record: RawRecord) -> TimelineItem {
    TimelineItem {
        document_number_bridge: record.remove(DOCUMENT_NUMBER_BRIDGE),
        document_number: record.remove(DOCUMENT_NUMBER),
        agency: record.remove(AGENCY).unwrap_or_default(),
        action: record.remove(ACTION).unwrap_or_default(),
        due_date: record.remove(DUE_DATE),
        extra: record,
    }
}

/// Load and normalize the executive orders table.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_executive_orders(path: &Path) -> Result<Vec<ExecutiveOrder>> {
    let records = load_table(path).await?;
    let total = records.len();

    let orders: Vec<ExecutiveOrder> = records
        .iter()
        .filter_map(executive_order_from_record)
        .collect();

    if orders.len() < total {
        debug!(
            dropped = total - orders.len(),
            "rows without a document number dropped"
        );
    }
    info!(count = orders.len(), "executive orders loaded");

    Ok(orders)
}

/// Load the timelines table.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_timeline(path: &Path) -> Result<Vec<TimelineItem>> {
    let items: Vec<TimelineItem> = load_table(path)
        .await?
        .into_iter()
        .map(timeline_item_from_record)
        .collect();

    let unlinked = items.iter().filter(|i| i.bridge_key().is_none()).count();
    info!(count = items.len(), unlinked, "timeline items loaded");

    Ok(items)
}
