//! Styles for the contexts CLI.
//!
//! Templates refer to semantic style names (`index`, `muted`, `success`...),
//! never to colors. This module maps those names to `console` styles, so the
//! look can change without touching templates.
//!
//! An unknown style name renders with a `(!?)` prefix, which makes typos in
//! templates visible instead of silently unstyled.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const TITLE: &str = "title";
    pub const INDEX: &str = "index";
    pub const ACTIVE: &str = "active";
    pub const NAME: &str = "name";
    pub const MUTED: &str = "muted";
    pub const FILTER_KIND: &str = "filter_kind";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// A named collection of styles used when rendering templates.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Apply a named style. Without color the text is returned unchanged.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(_) if !use_color => text.to_string(),
            Some(style) => style.clone().force_styling(true).apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static CONTEXTS_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::TITLE, Style::new().bold())
        .add(names::INDEX, Style::new().yellow())
        .add(names::ACTIVE, Style::new().green().bold())
        .add(names::NAME, Style::new())
        .add(names::MUTED, Style::new().color256(246).italic())
        .add(names::FILTER_KIND, Style::new().cyan())
        .add(names::INFO, Style::new().color256(246))
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red().bold())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_without_color() {
        assert_eq!(CONTEXTS_THEME.apply(names::SUCCESS, "done", false), "done");
    }

    #[test]
    fn test_color_output_has_ansi() {
        let styled = CONTEXTS_THEME.apply(names::ERROR, "boom", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("boom"));
    }

    #[test]
    fn test_unknown_style_is_flagged() {
        let styled = CONTEXTS_THEME.apply("typo", "hello", false);
        assert_eq!(styled, "(!?) hello");
    }
}
