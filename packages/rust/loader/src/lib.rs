//! CSV loading and record normalization for eodb.
//!
//! Reads the executive orders and timelines exports, tolerating the ragged
//! rows and loose quoting those exports contain, and translates the
//! bracket/quote-encoded list columns into plain ordered lists. Nothing past
//! this crate sees the upstream list encoding.

mod csv_table;
pub mod normalize;
mod records;

pub use csv_table::{RawRecord, load_table, parse_table};
pub use normalize::{split_multi_value, split_optional};
pub use records::{
    executive_order_from_record, load_executive_orders, load_timeline, timeline_item_from_record,
};
