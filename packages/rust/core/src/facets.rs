//! Distinct filter values offered by list views.

use std::collections::BTreeSet;

use eodb_shared::ExecutiveOrder;
use serde::Serialize;

/// Sorted, de-duplicated agency and category values across all orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub agencies: Vec<String>,
    pub categories: Vec<String>,
}

impl Facets {
    pub fn collect(orders: &[ExecutiveOrder]) -> Self {
        let mut agencies = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for order in orders {
            agencies.extend(order.agencies.iter().cloned());
            categories.extend(order.categories.iter().cloned());
        }

        Self {
            agencies: agencies.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }
}
