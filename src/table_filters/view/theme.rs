use formkit::Theme;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub static FILTERS_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("dropdown", "relative inline-block text-left")
        .add(
            "dropdown_button",
            "rounded-md border border-gray-300 bg-white px-2 py-2 shadow-sm dark:bg-gray-800",
        )
        .add("indicator", "h-5 w-5")
        .add("indicator_idle", "text-gray-400")
        .add("indicator_active", "text-green-400")
        .add(
            "filter_heading",
            "bg-gray-100 p-3 text-xs uppercase tracking-wide dark:bg-gray-700 dark:text-white",
        )
        .add("filter_body", "p-2 dark:bg-gray-700")
        .add("select", "text-sm")
        .add("date_range", "flex gap-2 text-sm")
        .add("date_input", "text-sm")
});

/// The default theme with individual class lists replaced by name.
pub fn theme_with_overrides(overrides: &BTreeMap<String, String>) -> Theme {
    overrides
        .iter()
        .fold(FILTERS_THEME.clone(), |theme, (name, classes)| {
            theme.add(name, classes)
        })
}
