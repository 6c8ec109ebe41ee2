//! A table instance and its filters.
//!
//! `Table` owns a [`FilterRegistry`] and forwards the filter operations to it.
//! Everything that depends on the current request takes the parsed
//! [`RequestQuery`] as an argument.

use crate::error::Result;
use crate::model::Filter;
use crate::query::RequestQuery;
use crate::registry::{DateRangeFilter, FilterRegistry, FilterValues, SelectFilter};
use crate::view::FilterView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    name: String,
    filters: FilterRegistry,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filters: FilterRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    pub fn select_filter(&mut self, filter: SelectFilter) -> &mut Self {
        self.filters.add_select_filter(filter);
        self
    }

    pub fn date_range_filter(&mut self, filter: DateRangeFilter) -> &mut Self {
        self.filters.add_date_range_filter(filter);
        self
    }

    pub fn live_filters(&self, query: &RequestQuery) -> Vec<Filter> {
        self.filters.live_filters(query)
    }

    pub fn has_filters(&self) -> bool {
        self.filters.has_filters()
    }

    pub fn has_filters_enabled(&self, query: &RequestQuery) -> bool {
        self.filters.has_filters_enabled(query)
    }

    pub fn filter_values(&self, query: &RequestQuery) -> FilterValues {
        self.filters.filter_values(query)
    }

    /// Renders the filter controls of this table for the given request.
    pub fn render_filters(&self, view: &FilterView, query: &RequestQuery) -> Result<String> {
        view.render(&self.live_filters(query))
    }
}
