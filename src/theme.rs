//! Theme tokens for the pawablox catalog.
//!
//! The coordinator never knows concrete colors. It writes opaque token
//! references (`var(--pw-red-600)`) into inline styles, exactly as the catalog
//! stylesheet expects. The preview shell resolves those references against the
//! palette below when it paints the document.
//!
//! # Examples
//!
//! ```
//! use pawablox::theme::{Token, resolve_color};
//!
//! let red = resolve_color(Token::Red600.css_var()).unwrap();
//! assert_eq!(red, pawablox::hex_to_color32("#dc2626"));
//! ```

use egui::Color32;

/// A named design token from the catalog stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Green600,
    Orange600,
    Red500,
    Red600,
    Spacing1,
    Spacing3,
    Spacing4,
    RadiusLg,
    ShadowLg,
    FontSizeXs,
    FontSizeSm,
}

impl Token {
    /// The CSS custom property name, without the `var()` wrapper.
    pub fn name(self) -> &'static str {
        match self {
            Token::Green600 => "--pw-green-600",
            Token::Orange600 => "--pw-orange-600",
            Token::Red500 => "--pw-red-500",
            Token::Red600 => "--pw-red-600",
            Token::Spacing1 => "--spacing-1",
            Token::Spacing3 => "--spacing-3",
            Token::Spacing4 => "--spacing-4",
            Token::RadiusLg => "--radius-lg",
            Token::ShadowLg => "--shadow-lg",
            Token::FontSizeXs => "--font-size-xs",
            Token::FontSizeSm => "--font-size-sm",
        }
    }

    /// The token as a CSS value, e.g. `var(--pw-red-600)`.
    pub fn css_var(self) -> &'static str {
        match self {
            Token::Green600 => "var(--pw-green-600)",
            Token::Orange600 => "var(--pw-orange-600)",
            Token::Red500 => "var(--pw-red-500)",
            Token::Red600 => "var(--pw-red-600)",
            Token::Spacing1 => "var(--spacing-1)",
            Token::Spacing3 => "var(--spacing-3)",
            Token::Spacing4 => "var(--spacing-4)",
            Token::RadiusLg => "var(--radius-lg)",
            Token::ShadowLg => "var(--shadow-lg)",
            Token::FontSizeXs => "var(--font-size-xs)",
            Token::FontSizeSm => "var(--font-size-sm)",
        }
    }
}

// Color tokens of the catalog stylesheet
const PALETTE: &[(&str, &str)] = &[
    ("--pw-green-600", "#16a34a"),
    ("--pw-orange-600", "#ea580c"),
    ("--pw-red-500", "#ef4444"),
    ("--pw-red-600", "#dc2626"),
];

/// Resolves a CSS color value to a concrete color.
///
/// Accepts `var(--token)` references to palette entries, `#rrggbb` literals
/// and the keyword `white`. Returns `None` for anything else.
pub fn resolve_color(value: &str) -> Option<Color32> {
    let value = value.trim();

    if let Some(inner) = value.strip_prefix("var(").and_then(|v| v.strip_suffix(')')) {
        let name = inner.trim();
        return PALETTE
            .iter()
            .find(|(token, _)| *token == name)
            .map(|(_, hex)| hex_to_color32(hex));
    }

    if value.starts_with('#') && value.len() == 7 {
        return Some(hex_to_color32(value));
    }

    if value.eq_ignore_ascii_case("white") {
        return Some(Color32::WHITE);
    }

    None
}

/// Applies the catalog's light look to egui visuals.
pub fn apply_catalog_visuals(visuals: &mut egui::Visuals) {
    visuals.panel_fill = Color32::from_rgb(250, 250, 250);
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.selection.bg_fill = Color32::from_rgb(191, 219, 254);
    visuals.hyperlink_color = Color32::from_rgb(37, 99, 235);
    visuals.error_fg_color = hex_to_color32("#dc2626");
    visuals.warn_fg_color = hex_to_color32("#ea580c");
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}
