//! The in-memory query surface over one load of the dataset.
//!
//! A [`Catalog`] is built once per view or command and never mutated
//! afterwards; every query borrows from it. Nothing here triggers a reload.

use std::collections::HashMap;

use eodb_shared::{DataSources, EodbError, ExecutiveOrder, FilterState, Result, TimelineItem};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::facets::Facets;
use crate::join;
use crate::paginate::{self, FilteredPage};

/// Loaded orders and timeline items with a document-number index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    orders: Vec<ExecutiveOrder>,
    timeline: Vec<TimelineItem>,
    /// First position of each document number in `orders`.
    by_document: HashMap<String, usize>,
}

/// An order together with the timeline items bridged to it.
#[derive(Debug, Serialize)]
pub struct OrderDetail<'a> {
    pub order: &'a ExecutiveOrder,
    pub timeline: Vec<&'a TimelineItem>,
}

/// Everything one agency is involved in.
#[derive(Debug, Serialize)]
pub struct AgencyView<'a> {
    pub agency: &'a str,
    pub orders: Vec<&'a ExecutiveOrder>,
    /// `Immediate` items first.
    pub timeline: Vec<&'a TimelineItem>,
}

impl AgencyView<'_> {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.timeline.is_empty()
    }
}

impl Catalog {
    /// Build a catalog, letting the first of any duplicate document numbers win.
    pub fn new(orders: Vec<ExecutiveOrder>, timeline: Vec<TimelineItem>) -> Self {
        let (by_document, _) = index_documents(&orders);
        Self {
            orders,
            timeline,
            by_document,
        }
    }

    /// Build a catalog, optionally refusing duplicate document numbers.
    pub fn try_new(
        orders: Vec<ExecutiveOrder>,
        timeline: Vec<TimelineItem>,
        reject_duplicates: bool,
    ) -> Result<Self> {
        let (by_document, duplicates) = index_documents(&orders);

        if !duplicates.is_empty() {
            if reject_duplicates {
                return Err(EodbError::validation(format!(
                    "duplicate document numbers: {}",
                    duplicates.join(", ")
                )));
            }
            warn!(
                count = duplicates.len(),
                first = %duplicates[0],
                "duplicate document numbers, first occurrence wins"
            );
        }

        Ok(Self {
            orders,
            timeline,
            by_document,
        })
    }

    /// Load both tables, orders first.
    #[instrument(skip_all, fields(
        orders = %sources.executive_orders.display(),
        timelines = %sources.timelines.display()
    ))]
    pub async fn load(sources: &DataSources) -> Result<Self> {
        let orders = eodb_loader::load_executive_orders(&sources.executive_orders).await?;
        let timeline = eodb_loader::load_timeline(&sources.timelines).await?;
        let catalog = Self::try_new(orders, timeline, sources.reject_duplicates)?;
        info!(
            orders = catalog.orders.len(),
            timeline = catalog.timeline.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load only the orders table, for views that never join.
    #[instrument(skip_all, fields(orders = %sources.executive_orders.display()))]
    pub async fn load_orders(sources: &DataSources) -> Result<Self> {
        let orders = eodb_loader::load_executive_orders(&sources.executive_orders).await?;
        Self::try_new(orders, Vec::new(), sources.reject_duplicates)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All orders in source order.
    pub fn list_all_records(&self) -> &[ExecutiveOrder] {
        &self.orders
    }

    /// All timeline items in source order.
    pub fn list_all_timeline_items(&self) -> &[TimelineItem] {
        &self.timeline
    }

    /// Indexed lookup; same result as a linear scan for the first match.
    pub fn find_record_by_document_number(&self, document_number: &str) -> Option<&ExecutiveOrder> {
        self.by_document
            .get(document_number)
            .map(|&idx| &self.orders[idx])
    }

    pub fn find_timeline_items_by_document_number(
        &self,
        document_number: &str,
    ) -> Vec<&TimelineItem> {
        join::timeline_for_order(&self.timeline, document_number)
    }

    pub fn find_records_by_agency(&self, agency: &str) -> Vec<&ExecutiveOrder> {
        join::orders_for_agency(&self.orders, agency)
    }

    /// Timeline items for `agency`, `Immediate` first.
    pub fn find_timeline_items_by_agency(&self, agency: &str) -> Vec<&TimelineItem> {
        join::timeline_for_agency(&self.timeline, agency)
    }

    pub fn filter_and_paginate(&self, state: &FilterState) -> FilteredPage {
        paginate::filter_and_paginate(&self.orders, state)
    }

    pub fn facets(&self) -> Facets {
        Facets::collect(&self.orders)
    }

    /// The order and its timeline, or `None` if no order has that number.
    pub fn order_detail(&self, document_number: &str) -> Option<OrderDetail<'_>> {
        let order = self.find_record_by_document_number(document_number)?;
        Some(OrderDetail {
            order,
            timeline: self.find_timeline_items_by_document_number(document_number),
        })
    }

    pub fn agency_view<'a>(&'a self, agency: &'a str) -> AgencyView<'a> {
        AgencyView {
            agency,
            orders: self.find_records_by_agency(agency),
            timeline: self.find_timeline_items_by_agency(agency),
        }
    }
}

/// Map each document number to its first position, collecting repeats.
fn index_documents(orders: &[ExecutiveOrder]) -> (HashMap<String, usize>, Vec<String>) {
    let mut index = HashMap::with_capacity(orders.len());
    let mut duplicates = Vec::new();

    for (idx, order) in orders.iter().enumerate() {
        if index.contains_key(&order.document_number) {
            duplicates.push(order.document_number.clone());
        } else {
            index.insert(order.document_number.clone(), idx);
        }
    }

    (index, duplicates)
}
