//! Predicate filtering over loaded executive orders.
//!
//! Active predicates are combined with AND; with none active every record
//! passes. Filtering borrows the input and preserves its relative order.

use eodb_shared::{ExecutiveOrder, FilterState};

/// Orders matching every active predicate in `state`.
pub fn apply_filters<'a>(
    orders: &'a [ExecutiveOrder],
    state: &FilterState,
) -> Vec<&'a ExecutiveOrder> {
    let agency = state.active_agency();
    let category = state.active_category();
    let needle = state.active_search().map(str::to_lowercase);

    orders
        .iter()
        .filter(|o| agency.is_none_or(|a| o.has_agency(a)))
        .filter(|o| category.is_none_or(|c| o.has_category(c)))
        .filter(|o| needle.as_deref().is_none_or(|n| matches_text(o, n)))
        .collect()
}

/// Case-insensitive substring match against title, document number and
/// the raw agency/category strings.
///
/// The raw strings still carry their brackets and quotes, so a needle such
/// as `"', '"` matches any record with two agencies. That is accepted
/// behavior. `needle` must already be lowercase.
fn matches_text(order: &ExecutiveOrder, needle: &str) -> bool {
    [
        order.title.as_str(),
        order.document_number.as_str(),
        order.agencies_raw.as_str(),
        order.categories_raw.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(doc: &str, title: &str, agencies: &[&str], categories: &[&str]) -> ExecutiveOrder {
        let quoted = |values: &[&str]| {
            let inner: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
            format!("[{}]", inner.join(", "))
        };
        ExecutiveOrder {
            document_number: doc.into(),
            title: title.into(),
            agencies_raw: quoted(agencies),
            categories_raw: quoted(categories),
            html_url: None,
            agencies: agencies.iter().map(|a| a.to_string()).collect(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn sample() -> Vec<ExecutiveOrder> {
        vec![
            order("2025-00100", "Clean Water Standards", &["EPA"], &["Environment"]),
            order("2025-00050", "Fair Wages", &["EPA"], &["Labor"]),
            order(
                "2025-00010",
                "Apprenticeship Expansion",
                &["Department of Labor"],
                &["Labor", "Education"],
            ),
            order("2024-09999", "", &[], &[]),
        ]
    }

    fn docs(filtered: &[&ExecutiveOrder]) -> Vec<String> {
        filtered.iter().map(|o| o.document_number.clone()).collect()
    }

    #[test]
    fn no_predicates_pass_everything_through() {
        let orders = sample();
        let filtered = apply_filters(&orders, &FilterState::default());
        assert_eq!(filtered.len(), orders.len());
        assert_eq!(filtered[3].document_number, "2024-09999");
    }

    #[test]
    fn agency_and_category_combine_with_and() {
        let orders = sample();
        let mut state = FilterState::default();
        state.set_agency(Some("EPA".into()));
        state.set_category(Some("Environment".into()));

        assert_eq!(docs(&apply_filters(&orders, &state)), vec!["2025-00100"]);
    }

    #[test]
    fn text_search_is_case_insensitive_across_fields() {
        let orders = sample();
        let mut state = FilterState::default();

        state.set_search_text("WAGES");
        assert_eq!(docs(&apply_filters(&orders, &state)), vec!["2025-00050"]);

        state.set_search_text("2025-000");
        assert_eq!(apply_filters(&orders, &state).len(), 3);

        state.set_search_text("department of");
        assert_eq!(docs(&apply_filters(&orders, &state)), vec!["2025-00010"]);

        state.set_search_text("education");
        assert_eq!(docs(&apply_filters(&orders, &state)), vec!["2025-00010"]);
    }

    #[test]
    fn search_matches_raw_decoration() {
        let orders = sample();
        let mut state = FilterState::default();
        state.set_search_text("', '");
        assert_eq!(docs(&apply_filters(&orders, &state)), vec!["2025-00010"]);
    }

    #[test]
    fn whitespace_search_is_inactive() {
        let orders = sample();
        let mut state = FilterState::default();
        state.set_search_text("   ");
        assert_eq!(apply_filters(&orders, &state).len(), orders.len());
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let orders = sample();
        let mut state = FilterState::default();
        state.set_agency(Some("Department of Defense".into()));
        assert!(apply_filters(&orders, &state).is_empty());
    }

    #[test]
    fn refining_never_grows_the_result() {
        let orders = sample();
        let steps = [
            FilterState::default(),
            FilterState {
                selected_agency: Some("EPA".into()),
                ..FilterState::default()
            },
            FilterState {
                selected_agency: Some("EPA".into()),
                search_text: "a".into(),
                ..FilterState::default()
            },
            FilterState {
                selected_agency: Some("EPA".into()),
                selected_category: Some("Labor".into()),
                search_text: "a".into(),
                current_page: 1,
            },
        ];

        let counts: Vec<usize> = steps
            .iter()
            .map(|s| apply_filters(&orders, s).len())
            .collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");
    }

    #[test]
    fn input_is_left_untouched() {
        let orders = sample();
        let before = orders.clone();
        let mut state = FilterState::default();
        state.set_search_text("labor");
        let _ = apply_filters(&orders, &state);
        assert_eq!(orders, before);
    }
}
