// File: src/theme.rs
// Light/dark presentation toggle driven by a boolean UI switch
use std::collections::BTreeMap;

#[cfg(feature = "tui")]
use ratatui::style::Color;

/// Attribute key the hosting surface styles itself by.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Switch on means light, off means dark.
    pub fn from_switch(switch_on: bool) -> Self {
        if switch_on { Theme::Light } else { Theme::Dark }
    }

    pub fn attribute_value(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(feature = "tui")]
impl Theme {
    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::White,
            Theme::Dark => Color::Reset,
        }
    }

    pub fn text(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn dim(self) -> Color {
        match self {
            Theme::Light => Color::Gray,
            Theme::Dark => Color::DarkGray,
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }

    pub fn highlight_bg(self) -> Color {
        match self {
            Theme::Light => Color::LightBlue,
            Theme::Dark => Color::DarkGray,
        }
    }
}

/// Presentation attributes owned by the hosting surface, the moral
/// equivalent of attributes on a document root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationAttrs(BTreeMap<String, String>);

impl PresentationAttrs {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn theme(&self) -> Option<Theme> {
        match self.get(THEME_ATTRIBUTE) {
            Some("light") => Some(Theme::Light),
            Some("dark") => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// What a switch callback hands back to the reactive owner of its output.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The side effect already happened; nothing downstream needs to change.
    NoUpdate,
}

/// Switch callback: writes the theme attribute and tells the owner that no
/// further update is needed. The attribute mutation is the only output.
pub fn on_switch(attrs: &mut PresentationAttrs, switch_on: bool) -> Signal {
    attrs.set(
        THEME_ATTRIBUTE,
        Theme::from_switch(switch_on).attribute_value(),
    );
    Signal::NoUpdate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_state_picks_the_theme() {
        assert_eq!(Theme::from_switch(true), Theme::Light);
        assert_eq!(Theme::from_switch(false), Theme::Dark);
    }

    #[test]
    fn on_switch_sets_attribute_and_signals_no_update() {
        let mut attrs = PresentationAttrs::default();
        assert_eq!(on_switch(&mut attrs, true), Signal::NoUpdate);
        assert_eq!(attrs.get(THEME_ATTRIBUTE), Some("light"));
        assert_eq!(attrs.theme(), Some(Theme::Light));

        assert_eq!(on_switch(&mut attrs, false), Signal::NoUpdate);
        assert_eq!(attrs.get(THEME_ATTRIBUTE), Some("dark"));
        assert_eq!(attrs.theme(), Some(Theme::Dark));
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
