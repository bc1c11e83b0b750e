use serde_json::{Value, json};

use super::chart_output::LayoutFragment;

/// Supplies the theme part of a layout.
///
/// The fragment is merged last, so any key it sets overrides the computed
/// default of the same name.
pub trait ThemeLayoutProvider {
    fn resolve_theme_layout(&self) -> LayoutFragment;
}

/// Provider that contributes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTheme;

impl ThemeLayoutProvider for NoTheme {
    fn resolve_theme_layout(&self) -> LayoutFragment {
        LayoutFragment::new()
    }
}

/// Provider returning a fixed fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticTheme {
    fragment: LayoutFragment,
}

impl StaticTheme {
    #[must_use]
    pub fn new(fragment: LayoutFragment) -> Self {
        Self { fragment }
    }

    /// Builds a provider from a JSON object; anything else yields an empty
    /// fragment.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fragment) => Self { fragment },
            _ => Self::default(),
        }
    }
}

impl ThemeLayoutProvider for StaticTheme {
    fn resolve_theme_layout(&self) -> LayoutFragment {
        self.fragment.clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeLayoutProvider for ThemeMode {
    fn resolve_theme_layout(&self) -> LayoutFragment {
        let (background, font) = match self {
            ThemeMode::Light => ("#fff", "#232323"),
            ThemeMode::Dark => ("#181a1b", "#fff"),
        };
        let mut fragment = LayoutFragment::new();
        fragment.insert("paper_bgcolor".to_owned(), json!(background));
        fragment.insert("plot_bgcolor".to_owned(), json!(background));
        fragment.insert("font".to_owned(), json!({ "color": font }));
        fragment
    }
}

impl<T: ThemeLayoutProvider + ?Sized> ThemeLayoutProvider for &T {
    fn resolve_theme_layout(&self) -> LayoutFragment {
        (**self).resolve_theme_layout()
    }
}

/// Shallow merge: keys in `fragment` replace keys in `layout`.
pub(crate) fn merge_layout_fragment(layout: &mut LayoutFragment, fragment: LayoutFragment) {
    for (key, value) in fragment {
        layout.insert(key, value);
    }
}
