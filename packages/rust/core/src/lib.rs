//! Query logic for eodb.
//!
//! Joins executive orders with their timeline items, filters and paginates
//! order lists, and exposes it all through the [`Catalog`] query surface.
//! Everything after the load is synchronous and pure over borrowed data.

pub mod catalog;
pub mod facets;
pub mod filter;
pub mod join;
pub mod paginate;

pub use catalog::{AgencyView, Catalog, OrderDetail};
pub use facets::Facets;
pub use filter::apply_filters;
pub use paginate::{FilteredPage, PAGE_SIZE, PageLink, Pager, filter_and_paginate};
