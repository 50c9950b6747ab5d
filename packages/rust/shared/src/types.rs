//! Core domain types for the executive orders dataset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Due-date sentinel for actions without a fixed deadline. Sorts first.
pub const IMMEDIATE: &str = "Immediate";

/// Display fallback for records with an empty title.
pub const UNTITLED: &str = "Untitled";

// ---------------------------------------------------------------------------
// ExecutiveOrder
// ---------------------------------------------------------------------------

/// A single executive order, normalized at load time.
///
/// The `*_raw` fields hold the bracket/quote-decorated strings exactly as
/// exported upstream. They are kept for free-text search only and never
/// serialized; consumers read the normalized `agencies` / `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveOrder {
    /// Federal Register document number (join and sort key).
    pub document_number: String,
    /// Title as published. May be empty.
    #[serde(default)]
    pub title: String,
    /// Raw agencies field, e.g. `"['Department of Labor', 'EPA']"`.
    #[serde(skip)]
    pub agencies_raw: String,
    /// Raw categories field, same encoding as `agencies_raw`.
    #[serde(skip)]
    pub categories_raw: String,
    /// External reference link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Normalized agencies, in order of appearance.
    #[serde(default)]
    pub agencies: Vec<String>,
    /// Normalized categories, in order of appearance.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ExecutiveOrder {
    /// Title for display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Whether the normalized agency list names `agency` exactly.
    pub fn has_agency(&self, agency: &str) -> bool {
        self.agencies.iter().any(|a| a == agency)
    }

    /// Whether the normalized category list names `category` exactly.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

// ---------------------------------------------------------------------------
// TimelineItem
// ---------------------------------------------------------------------------

/// A required agency action tied to an executive order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Bridge key into [`ExecutiveOrder::document_number`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number_bridge: Option<String>,
    /// Alternate key column carried by some degraded rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Responsible agency, matched exactly.
    #[serde(default)]
    pub agency: String,
    /// Free-text description of the required action.
    #[serde(default)]
    pub action: String,
    /// A date string, [`IMMEDIATE`], or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Any other non-empty columns from the source row.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, String>,
}

impl TimelineItem {
    /// The key linking this item to its order.
    ///
    /// Reads `document_number_bridge` and falls back to `document_number`,
    /// since upstream exports use both column names.
    pub fn bridge_key(&self) -> Option<&str> {
        self.document_number_bridge
            .as_deref()
            .or(self.document_number.as_deref())
    }

    /// Whether the due date is the [`IMMEDIATE`] sentinel.
    pub fn is_immediate(&self) -> bool {
        self.due_date.as_deref() == Some(IMMEDIATE)
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// View-scoped filter and page selection.
///
/// Owned by the presentation layer and passed by reference into the pure
/// filtering functions. Any predicate change resets `current_page` to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub selected_agency: Option<String>,
    #[serde(default)]
    pub selected_category: Option<String>,
    #[serde(default)]
    pub search_text: String,
    /// 1-based page index.
    #[serde(default = "first_page")]
    pub current_page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_agency: None,
            selected_category: None,
            search_text: String::new(),
            current_page: first_page(),
        }
    }
}

impl FilterState {
    /// Select an agency (or none) and go back to page 1.
    pub fn set_agency(&mut self, agency: Option<String>) {
        self.selected_agency = agency;
        self.current_page = first_page();
    }

    /// Select a category (or none) and go back to page 1.
    pub fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category;
        self.current_page = first_page();
    }

    /// Replace the search text and go back to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = first_page();
    }

    /// Drop every predicate.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Move to a page without touching the predicates.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// The agency predicate, if active. Empty selections count as none.
    pub fn active_agency(&self) -> Option<&str> {
        self.selected_agency.as_deref().filter(|a| !a.is_empty())
    }

    /// The category predicate, if active.
    pub fn active_category(&self) -> Option<&str> {
        self.selected_category.as_deref().filter(|c| !c.is_empty())
    }

    /// The search text, if it contains anything besides whitespace.
    pub fn active_search(&self) -> Option<&str> {
        if self.search_text.trim().is_empty() {
            None
        } else {
            Some(&self.search_text)
        }
    }

    /// Whether any predicate is active.
    pub fn is_filtering(&self) -> bool {
        self.active_agency().is_some()
            || self.active_category().is_some()
            || self.active_search().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(bridge: Option<&str>, doc: Option<&str>, due: Option<&str>) -> TimelineItem {
        TimelineItem {
            document_number_bridge: bridge.map(String::from),
            document_number: doc.map(String::from),
            agency: "EPA".into(),
            action: "Review rules".into(),
            due_date: due.map(String::from),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn bridge_key_falls_back_to_document_number() {
        assert_eq!(
            item(Some("2025-01000"), Some("2025-02000"), None).bridge_key(),
            Some("2025-01000")
        );
        assert_eq!(item(None, Some("2025-02000"), None).bridge_key(), Some("2025-02000"));
        assert_eq!(item(None, None, None).bridge_key(), None);
    }

    #[test]
    fn immediate_sentinel_is_exact() {
        assert!(item(None, None, Some("Immediate")).is_immediate());
        assert!(!item(None, None, Some("immediate")).is_immediate());
        assert!(!item(None, None, None).is_immediate());
    }

    #[test]
    fn filter_setters_reset_page() {
        let mut state = FilterState::default();
        assert_eq!(state.current_page, 1);

        state.set_page(4);
        state.set_agency(Some("EPA".into()));
        assert_eq!(state.current_page, 1);

        state.set_page(3);
        state.set_search_text("labor");
        assert_eq!(state.current_page, 1);

        state.set_page(2);
        state.set_category(None);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn empty_selections_are_inactive() {
        let mut state = FilterState::default();
        state.set_agency(Some(String::new()));
        state.set_search_text("   ");
        assert!(state.active_agency().is_none());
        assert!(state.active_search().is_none());
        assert!(!state.is_filtering());

        state.set_category(Some("Environment".into()));
        assert!(state.is_filtering());
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn order_serialization_hides_raw_fields() {
        let order = ExecutiveOrder {
            document_number: "2025-00100".into(),
            title: String::new(),
            agencies_raw: "['EPA']".into(),
            categories_raw: "['Environment']".into(),
            html_url: None,
            agencies: vec!["EPA".into()],
            categories: vec!["Environment".into()],
        };

        let json = serde_json::to_string(&order).expect("serialize");
        assert!(!json.contains("['EPA']"));
        assert!(json.contains("\"agencies\":[\"EPA\"]"));
        assert_eq!(order.display_title(), UNTITLED);
        assert!(order.has_agency("EPA"));
        assert!(!order.has_category("Labor"));
    }

    #[test]
    fn timeline_extra_columns_flatten() {
        let mut timeline = item(Some("2025-01000"), None, Some("Immediate"));
        timeline.extra.insert("eo_title".into(), "Protecting Workers".into());

        let json = serde_json::to_value(&timeline).expect("serialize");
        assert_eq!(json["eo_title"], "Protecting Workers");
        assert_eq!(json["due_date"], "Immediate");
        assert!(json.get("document_number").is_none());
    }
}
