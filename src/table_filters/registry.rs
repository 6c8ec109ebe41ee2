//! # Filter Registry
//!
//! The ordered set of filter definitions attached to one table.
//!
//! ## Registration
//!
//! Filters are described with the [`SelectFilter`] and [`DateRangeFilter`]
//! builders and added with [`FilterRegistry::add_select_filter`] /
//! [`FilterRegistry::add_date_range_filter`]. Keys are unique: adding a filter
//! whose key is already registered removes the old definition and appends the
//! new one, so the replacement moves to the end of the iteration order.
//!
//! ## Per-request projections
//!
//! The stored definitions are never touched by request handling. Every read that
//! depends on the request takes the parsed [`RequestQuery`] explicitly and works on
//! independent copies ("live filters") whose value is the request's value when
//! the key is present, and the registered default otherwise. A key present
//! without a value clears the default.
//!
//! ```rust
//! use table_filters::registry::{DateRangeFilter, FilterRegistry, SelectFilter};
//! use table_filters::query::RequestQuery;
//!
//! let mut registry = FilterRegistry::new();
//! registry
//!     .add_select_filter(SelectFilter::new("status", [("active", "Active"), ("banned", "Banned")]))
//!     .add_date_range_filter(DateRangeFilter::new("created_at").timezone("UTC"));
//!
//! let query = RequestQuery::parse("filter[status]=banned").unwrap();
//! assert!(registry.has_filters_enabled(&query));
//! assert!(!registry.has_filters_enabled(&RequestQuery::new()));
//! ```

use crate::model::{headline, Filter, FilterKind, FilterOption, FilterValue};
use crate::query::RequestQuery;
use std::collections::BTreeMap;

/// Label of the synthetic "no filter" select entry.
pub const DEFAULT_NO_FILTER_OPTION_LABEL: &str = "-";

/// Flat key to value projection of the live filters, handed to the client-side form.
pub type FilterValues = BTreeMap<String, Option<FilterValue>>;

/// Describes a select filter before registration.
#[derive(Debug, Clone)]
pub struct SelectFilter {
    key: String,
    options: Vec<FilterOption>,
    label: Option<String>,
    default_value: Option<String>,
    no_filter_option: bool,
    no_filter_option_label: Option<String>,
}

impl SelectFilter {
    pub fn new<I, O>(key: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<FilterOption>,
    {
        Self {
            key: key.into(),
            options: options.into_iter().map(Into::into).collect(),
            label: None,
            default_value: None,
            no_filter_option: true,
            no_filter_option_label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn no_filter_option(mut self, enabled: bool) -> Self {
        self.no_filter_option = enabled;
        self
    }

    pub fn no_filter_option_label(mut self, label: impl Into<String>) -> Self {
        self.no_filter_option_label = Some(label.into());
        self
    }

    fn into_filter(self) -> Filter {
        Filter {
            label: resolve_label(self.label, &self.key),
            key: self.key,
            kind: FilterKind::Select,
            options: self.options,
            value: self.default_value.map(FilterValue::Text),
            no_filter_option: self.no_filter_option,
            no_filter_option_label: self
                .no_filter_option_label
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| DEFAULT_NO_FILTER_OPTION_LABEL.to_string()),
            timezone: None,
        }
    }
}

/// Describes a date-range filter before registration.
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
    key: String,
    label: Option<String>,
    default_value: Option<FilterValue>,
    timezone: Option<String>,
}

impl DateRangeFilter {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            default_value: None,
            timezone: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Accepts either a raw string (e.g. `"2020-01-01,2020-01-31"`) or a
    /// [`DateRange`](crate::model::DateRange).
    pub fn default_value(mut self, value: impl Into<FilterValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    fn into_filter(self) -> Filter {
        Filter {
            label: resolve_label(self.label, &self.key),
            key: self.key,
            kind: FilterKind::DateRange,
            options: Vec::new(),
            value: self.default_value,
            no_filter_option: false,
            no_filter_option_label: String::new(),
            timezone: self.timezone,
        }
    }
}

fn resolve_label(label: Option<String>, key: &str) -> String {
    label
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| headline(key))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRegistry {
    filters: Vec<Filter>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_select_filter(&mut self, filter: SelectFilter) -> &mut Self {
        self.upsert(filter.into_filter())
    }

    pub fn add_date_range_filter(&mut self, filter: DateRangeFilter) -> &mut Self {
        self.upsert(filter.into_filter())
    }

    /// Removes any definition with the same key, then appends.
    fn upsert(&mut self, filter: Filter) -> &mut Self {
        if filter.key.is_empty() {
            log::warn!("registering a {} filter with an empty key", filter.kind);
        }

        let before = self.filters.len();
        self.filters.retain(|existing| existing.key != filter.key);
        if self.filters.len() != before {
            log::debug!("replacing filter {:?}", filter.key);
        } else {
            log::debug!("adding {} filter {:?}", filter.kind, filter.key);
        }

        self.filters.push(filter);
        self
    }

    /// Independent copies of every definition, in registration order, with values
    /// taken from `query` where it has an entry for the key.
    pub fn live_filters(&self, query: &RequestQuery) -> Vec<Filter> {
        self.filters
            .iter()
            .map(|definition| {
                let mut live = definition.clone();
                if let Some(value) = query.get(&live.key) {
                    log::trace!("filter {:?} set from request: {:?}", live.key, value);
                    live.value = value.cloned();
                }
                live
            })
            .collect()
    }

    /// Whether any filter is registered, regardless of the request.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Whether any live filter has a value, i.e. the table is currently filtered.
    pub fn has_filters_enabled(&self, query: &RequestQuery) -> bool {
        any_enabled(&self.live_filters(query))
    }

    /// Key to value map of the live filters. Filters without a value map to `None`.
    pub fn filter_values(&self, query: &RequestQuery) -> FilterValues {
        values_of(&self.live_filters(query))
    }

    /// The registered definition for `key`.
    pub fn get(&self, key: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|filter| filter.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Whether any of the given live filters has a value.
pub fn any_enabled(filters: &[Filter]) -> bool {
    filters.iter().any(Filter::is_enabled)
}

/// Key to value map of the given live filters.
pub fn values_of(filters: &[Filter]) -> FilterValues {
    filters
        .iter()
        .map(|filter| (filter.key.clone(), filter.value.clone()))
        .collect()
}

impl<'a> IntoIterator for &'a FilterRegistry {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateRange;

    fn status_options() -> Vec<(&'static str, &'static str)> {
        vec![("active", "Active"), ("banned", "Banned")]
    }

    fn keys(filters: &[Filter]) -> Vec<&str> {
        filters.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_select_filter_defaults() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("account_status", status_options()));

        let filter = registry.get("account_status").unwrap();
        assert_eq!(filter.label, "Account Status");
        assert_eq!(filter.kind, FilterKind::Select);
        assert_eq!(filter.options.len(), 2);
        assert_eq!(filter.value, None);
        assert!(filter.no_filter_option);
        assert_eq!(filter.no_filter_option_label, "-");
        assert_eq!(filter.timezone, None);
    }

    #[test]
    fn test_select_filter_explicit_attributes() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(
            SelectFilter::new("status", status_options())
                .label("State")
                .default_value("active")
                .no_filter_option(false)
                .no_filter_option_label("Any"),
        );

        let filter = registry.get("status").unwrap();
        assert_eq!(filter.label, "State");
        assert_eq!(filter.value, Some(FilterValue::from("active")));
        assert!(!filter.no_filter_option);
        assert_eq!(filter.no_filter_option_label, "Any");
    }

    #[test]
    fn test_empty_labels_fall_back() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(
            SelectFilter::new("status", status_options())
                .label("")
                .no_filter_option_label(""),
        );

        let filter = registry.get("status").unwrap();
        assert_eq!(filter.label, "Status");
        assert_eq!(filter.no_filter_option_label, "-");
    }

    #[test]
    fn test_date_range_filter_forces_select_fields() {
        let mut registry = FilterRegistry::new();
        registry.add_date_range_filter(
            DateRangeFilter::new("created_at")
                .default_value("2020-01-01,2020-01-31")
                .timezone("Europe/Amsterdam"),
        );

        let filter = registry.get("created_at").unwrap();
        assert_eq!(filter.label, "Created At");
        assert_eq!(filter.kind, FilterKind::DateRange);
        assert!(filter.options.is_empty());
        assert!(!filter.no_filter_option);
        assert_eq!(filter.no_filter_option_label, "");
        assert_eq!(filter.timezone.as_deref(), Some("Europe/Amsterdam"));
        assert_eq!(
            filter.value,
            Some(FilterValue::from("2020-01-01,2020-01-31"))
        );
    }

    #[test]
    fn test_upsert_replaces_and_moves_to_end() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("status", status_options()))
            .add_select_filter(SelectFilter::new("role", [("admin", "Admin")]))
            .add_select_filter(SelectFilter::new("status", [("archived", "Archived")]));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["role", "status"]);

        let status = registry.get("status").unwrap();
        assert_eq!(status.options, vec![FilterOption::new("archived", "Archived")]);
    }

    #[test]
    fn test_upsert_across_kinds() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("created_at", status_options()))
            .add_date_range_filter(DateRangeFilter::new("created_at"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("created_at").unwrap().kind,
            FilterKind::DateRange
        );
    }

    #[test]
    fn test_live_filters_preserve_order() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("a", status_options()))
            .add_date_range_filter(DateRangeFilter::new("b"))
            .add_select_filter(SelectFilter::new("c", status_options()));

        let live = registry.live_filters(&RequestQuery::new());
        assert_eq!(keys(&live), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_propagation() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("answer", status_options()).default_value("42"));

        let live = registry.live_filters(&RequestQuery::new());
        assert_eq!(live[0].value, Some(FilterValue::from("42")));
    }

    #[test]
    fn test_request_override() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("answer", status_options()).default_value("42"));

        let query: RequestQuery = [("answer", "7")].into_iter().collect();
        let live = registry.live_filters(&query);
        assert_eq!(live[0].value, Some(FilterValue::from("7")));
    }

    #[test]
    fn test_empty_request_value_clears_default() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("status", status_options()).default_value("active"))
            .add_date_range_filter(
                DateRangeFilter::new("created_at").default_value("2020-01-01,2020-01-31"),
            );
        assert!(registry.has_filters_enabled(&RequestQuery::new()));

        let query =
            RequestQuery::parse("filter[status]=&filter[created_at][start]=&filter[created_at][end]=")
                .unwrap();
        let live = registry.live_filters(&query);

        assert_eq!(live[0].value, None);
        assert_eq!(live[1].value, None);
        assert!(!registry.has_filters_enabled(&query));

        let values = registry.filter_values(&query);
        assert_eq!(values["status"], None);
        assert_eq!(values["created_at"], None);
    }

    #[test]
    fn test_no_filter_choice_is_not_enabled() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("status", status_options()));

        let query = RequestQuery::parse("filter[status]=").unwrap();
        assert!(!registry.has_filters_enabled(&query));
        assert_eq!(registry.live_filters(&query)[0].value, None);
    }

    #[test]
    fn test_request_value_is_not_validated() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("status", status_options()))
            .add_date_range_filter(DateRangeFilter::new("created_at"));

        let query: RequestQuery = [("status", "not-an-option"), ("created_at", "garbage")]
            .into_iter()
            .collect();
        let live = registry.live_filters(&query);

        assert_eq!(live[0].value, Some(FilterValue::from("not-an-option")));
        assert_eq!(live[1].value, Some(FilterValue::from("garbage")));
    }

    #[test]
    fn test_structured_request_value() {
        let mut registry = FilterRegistry::new();
        registry.add_date_range_filter(DateRangeFilter::new("created_at"));

        let range = DateRange {
            start: Some("2020-01-01".into()),
            end: None,
        };
        let mut query = RequestQuery::new();
        query.insert("created_at", range.clone());

        let live = registry.live_filters(&query);
        assert_eq!(live[0].value, Some(FilterValue::Range(range)));
    }

    #[test]
    fn test_unknown_query_keys_are_ignored() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("status", status_options()));

        let query: RequestQuery = [("other", "x")].into_iter().collect();
        let live = registry.live_filters(&query);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].value, None);
    }

    #[test]
    fn test_live_filters_do_not_mutate_definitions() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("answer", status_options()).default_value("42"));
        let snapshot = registry.clone();

        let first: RequestQuery = [("answer", "1")].into_iter().collect();
        let second: RequestQuery = [("answer", "2")].into_iter().collect();

        let mut live = registry.live_filters(&first);
        live[0].value = Some(FilterValue::from("mutated"));
        live[0].label = "Mutated".into();
        registry.live_filters(&second);

        assert_eq!(registry, snapshot);
        assert_eq!(
            registry.get("answer").unwrap().value,
            Some(FilterValue::from("42"))
        );
    }

    #[test]
    fn test_has_filters() {
        let mut registry = FilterRegistry::new();
        assert!(!registry.has_filters());

        registry.add_date_range_filter(DateRangeFilter::new("created_at"));
        assert!(registry.has_filters());
    }

    #[test]
    fn test_has_filters_enabled() {
        let mut registry = FilterRegistry::new();
        assert!(!registry.has_filters_enabled(&RequestQuery::new()));

        registry
            .add_select_filter(SelectFilter::new("status", status_options()))
            .add_date_range_filter(DateRangeFilter::new("created_at"));
        assert!(!registry.has_filters_enabled(&RequestQuery::new()));

        let query: RequestQuery = [("created_at", "2020-01-01,2020-01-31")]
            .into_iter()
            .collect();
        assert!(registry.has_filters_enabled(&query));
    }

    #[test]
    fn test_has_filters_enabled_by_default_value() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("status", status_options()).default_value("active"));

        assert!(registry.has_filters_enabled(&RequestQuery::new()));
    }

    #[test]
    fn test_filter_values_flatten_live_filters() {
        let mut registry = FilterRegistry::new();
        registry
            .add_select_filter(SelectFilter::new("status", status_options()).default_value("active"))
            .add_select_filter(SelectFilter::new("role", [("admin", "Admin")]))
            .add_date_range_filter(DateRangeFilter::new("created_at"));

        let query: RequestQuery = [("created_at", "2020-01-01,2020-01-31"), ("junk", "x")]
            .into_iter()
            .collect();
        let values = registry.filter_values(&query);

        assert_eq!(values.len(), 3);
        assert!(!values.contains_key("junk"));
        for filter in registry.live_filters(&query) {
            assert_eq!(values[&filter.key], filter.value);
        }
        assert_eq!(values["role"], None);
    }

    #[test]
    fn test_empty_options_are_accepted() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("status", Vec::<FilterOption>::new()));

        assert!(registry.get("status").unwrap().options.is_empty());
    }

    #[test]
    fn test_duplicate_options_are_kept() {
        let mut registry = FilterRegistry::new();
        registry.add_select_filter(SelectFilter::new("status", [("a", "A"), ("a", "A")]));

        assert_eq!(registry.get("status").unwrap().options.len(), 2);
    }

    #[test]
    fn test_empty_key_is_accepted() {
        let mut registry = FilterRegistry::new();
        registry.add_date_range_filter(DateRangeFilter::new(""));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("").unwrap().label, "");
    }
}
