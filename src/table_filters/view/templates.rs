//! Markup for the filter dropdown.
//!
//! Class lists are resolved through `classes()`; see `theme.rs` for the names.

pub const FILTERS_TEMPLATE: &str = r#"<div class="{{ classes('dropdown') }}" data-component="filters-dropdown">
  <button type="button" class="{{ classes('dropdown_button') }}" aria-haspopup="menu" data-filters-enabled="{{ enabled }}">
    <svg xmlns="http://www.w3.org/2000/svg" class="{{ classes('indicator', 'indicator_active' if enabled else 'indicator_idle') }}" viewBox="0 0 20 20" fill="currentColor">
      <path fill-rule="evenodd" d="M3 3a1 1 0 011-1h12a1 1 0 011 1v3a1 1 0 01-.293.707L12 11.414V15a1 1 0 01-.293.707l-2 2A1 1 0 018 17v-5.586L3.293 6.707A1 1 0 013 6V3z" clip-rule="evenodd" />
    </svg>
  </button>
  <div role="menu" aria-orientation="horizontal" aria-labelledby="filter-menu">
    <form data-default="{{ defaults }}" data-change="table.updateFilterValues">
{%- for group in groups %}
      <div data-filter="{{ group.key }}">
        <h3 class="{{ classes('filter_heading') }}">{{ group.label }}</h3>
        <div class="{{ classes('filter_body') }}">{{ group.control | safe }}</div>
      </div>
{%- endfor %}
    </form>
  </div>
</div>
"#;

pub const SELECT_TEMPLATE: &str = r#"<select name="{{ key }}" class="{{ classes('select') }}">
{%- for option in options %}
  <option value="{{ option.value }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
{%- endfor %}
</select>"#;

pub const DATE_RANGE_TEMPLATE: &str = r#"<div class="{{ classes('date_range') }}" data-date-range{% if timezone %} data-timezone="{{ timezone }}"{% endif %}>
  <input type="date" name="{{ key }}[start]" value="{{ start }}" class="{{ classes('date_input') }}" aria-label="{{ label }} (from)">
  <input type="date" name="{{ key }}[end]" value="{{ end }}" class="{{ classes('date_input') }}" aria-label="{{ label }} (until)">
</div>"#;
