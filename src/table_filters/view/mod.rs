//! # Filter View
//!
//! Renders live filters as the filter dropdown of a table: an indicator button
//! whose icon reflects whether filtering is active, and a form with one labeled
//! control group per filter.
//!
//! ## Controls
//!
//! The control is picked by matching on [`FilterKind`], each variant with its own
//! template:
//! - `Select`: a single-choice `<select>` named after the filter key, led by the
//!   "no filter" entry while the filter has no value.
//! - `DateRange`: a pair of date inputs (`key[start]`, `key[end]`), tagged with
//!   the filter's timezone when it has one.
//!
//! ## Form state
//!
//! The form carries the JSON-encoded key to value map of the filters in
//! `data-default`; the client-side binding layer seeds its state from it and sends
//! the same shape back on change.
//!
//! Layout decisions (option selection, splitting range bounds) are made here in
//! Rust. Templates only place the resulting values and pick classes.

mod templates;
mod theme;

pub use theme::{theme_with_overrides, FILTERS_THEME};

use crate::error::Result;
use crate::model::{Filter, FilterKind, FilterValue};
use crate::registry::{any_enabled, values_of};
use formkit::{Renderer, Theme};
use serde::Serialize;
use templates::{DATE_RANGE_TEMPLATE, FILTERS_TEMPLATE, SELECT_TEMPLATE};

const FILTERS: &str = "filters";
const SELECT: &str = "select";
const DATE_RANGE: &str = "date_range";

#[derive(Serialize)]
struct FiltersData {
    enabled: bool,
    defaults: String,
    groups: Vec<GroupData>,
}

#[derive(Serialize)]
struct GroupData {
    key: String,
    label: String,
    // Pre-rendered control markup
    control: String,
}

#[derive(Serialize)]
struct SelectData<'a> {
    key: &'a str,
    options: Vec<OptionData>,
}

#[derive(Serialize)]
struct OptionData {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Serialize)]
struct DateRangeData<'a> {
    key: &'a str,
    label: &'a str,
    start: String,
    end: String,
    timezone: Option<&'a str>,
}

pub struct FilterView {
    renderer: Renderer,
}

impl FilterView {
    /// A view using [`FILTERS_THEME`].
    pub fn new() -> Result<Self> {
        Self::with_theme(FILTERS_THEME.clone())
    }

    pub fn with_theme(theme: Theme) -> Result<Self> {
        let mut renderer = Renderer::new(theme);
        renderer.add_template(FILTERS, FILTERS_TEMPLATE)?;
        renderer.add_template(SELECT, SELECT_TEMPLATE)?;
        renderer.add_template(DATE_RANGE, DATE_RANGE_TEMPLATE)?;
        Ok(Self { renderer })
    }

    /// Renders the dropdown for a list of live filters.
    pub fn render(&self, filters: &[Filter]) -> Result<String> {
        log::debug!("rendering {} filters", filters.len());

        let groups = filters
            .iter()
            .map(|filter| -> Result<GroupData> {
                Ok(GroupData {
                    key: filter.key.clone(),
                    label: filter.label.clone(),
                    control: self.render_control(filter)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let data = FiltersData {
            enabled: any_enabled(filters),
            defaults: serde_json::to_string(&values_of(filters))?,
            groups,
        };
        Ok(self.renderer.render(FILTERS, &data)?)
    }

    /// Renders the control for a single filter.
    pub fn render_control(&self, filter: &Filter) -> Result<String> {
        match filter.kind {
            FilterKind::Select => self.render_select(filter),
            FilterKind::DateRange => self.render_date_range(filter),
        }
    }

    fn render_select(&self, filter: &Filter) -> Result<String> {
        let current = filter.text_value().unwrap_or_default();
        let options = filter
            .control_options()
            .into_iter()
            .map(|option| OptionData {
                selected: option.value == current,
                value: option.value,
                label: option.label,
            })
            .collect();

        let data = SelectData {
            key: &filter.key,
            options,
        };
        Ok(self.renderer.render(SELECT, &data)?)
    }

    fn render_date_range(&self, filter: &Filter) -> Result<String> {
        let (start, end) = range_bounds(filter.value.as_ref());
        let data = DateRangeData {
            key: &filter.key,
            label: &filter.label,
            start,
            end,
            timezone: filter.timezone.as_deref(),
        };
        Ok(self.renderer.render(DATE_RANGE, &data)?)
    }
}

/// Start and end shown in the date inputs.
///
/// A text value is split once on `,` for display; it is never rewritten.
fn range_bounds(value: Option<&FilterValue>) -> (String, String) {
    match value {
        Some(FilterValue::Range(range)) => (
            range.start.clone().unwrap_or_default(),
            range.end.clone().unwrap_or_default(),
        ),
        Some(FilterValue::Text(text)) => match text.split_once(',') {
            Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
            None => (text.trim().to_string(), String::new()),
        },
        None => (String::new(), String::new()),
    }
}
