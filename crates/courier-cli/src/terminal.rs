//! Terminal styling and color utilities.
//!
//! ANSI escape codes for the dispatch trace plus detection of whether the
//! current terminal wants colors or Unicode.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse red for expedited order badges.
    pub const TAG_EXPEDITED: &str = "\x1b[1;7;31m";
    /// Bold reverse blue for standard order badges.
    pub const TAG_STANDARD: &str = "\x1b[1;7;34m";

    /// Bright bold white for location names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for arrows and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for distances.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for the banner border.
    pub const CYAN: &str = "\x1b[36m";
    /// Orange (256-color) for the banner text.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for unreachable legs.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_expedited: &'static str,
    pub tag_standard: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_expedited: colors::TAG_EXPEDITED,
            tag_standard: colors::TAG_STANDARD,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_expedited: "",
            tag_standard: "",
            white_bold: "",
            gray: "",
            green: "",
            red: "",
        }
    }

    /// Pick [`ColorPalette::colored`] or [`ColorPalette::plain`] based on
    /// [`supports_color`].
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Check if the terminal supports Unicode characters via `LANG` / `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LC_ALL", "LANG"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.to_uppercase().contains("UTF"))
            .unwrap_or(false)
    })
}

/// Format a number with thousand separators (commas).
///
/// ```
/// # use courier_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
