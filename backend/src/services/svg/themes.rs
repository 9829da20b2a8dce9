/// Base colors for a card, as hex without the leading `#`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub title_color: &'static str,
    pub icon_color: &'static str,
    pub text_color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
}

const fn theme(
    title_color: &'static str,
    icon_color: &'static str,
    text_color: &'static str,
    bg_color: &'static str,
) -> Theme {
    Theme {
        title_color,
        icon_color,
        text_color,
        bg_color,
        border_color: "e4e2e2",
    }
}

pub const DEFAULT_THEME: Theme = theme("2f80ed", "4c71f2", "434d58", "ffffff");

const THEMES: &[(&str, Theme)] = &[
    ("default", DEFAULT_THEME),
    ("dark", theme("ffffff", "79ff97", "9f9f9f", "151515")),
    ("radical", theme("fe428e", "f8d847", "a9fef7", "141321")),
    ("merko", theme("abd200", "b7d364", "68b587", "0a0f0b")),
    ("gruvbox", theme("fabd2f", "fe8019", "8ec07c", "282828")),
    ("tokyonight", theme("70a5fd", "bf91f3", "38bdae", "1a1b27")),
    ("onedark", theme("e4bf7a", "8eb573", "df6d74", "282c34")),
    ("cobalt", theme("e683d9", "0480ef", "75eeb2", "193549")),
    ("synthwave", theme("e2e9ec", "ef8539", "e5289e", "2b213a")),
    ("highcontrast", theme("e7f216", "00ffff", "ffffff", "000000")),
    ("dracula", theme("ff6e96", "79dafa", "f8f8f2", "282a36")),
];

/// Named theme, falling back to the default for unknown or missing names
pub fn find_theme(name: Option<&str>) -> Theme {
    name.and_then(|name| {
        THEMES
            .iter()
            .find(|(theme_name, _)| theme_name.eq_ignore_ascii_case(name.trim()))
            .map(|(_, theme)| *theme)
    })
    .unwrap_or(DEFAULT_THEME)
}

/// Accept 3, 4, 6 or 8 hex digits with an optional leading `#`.
/// Anything else is dropped so it never reaches the markup.
pub fn sanitize_color(value: Option<&str>) -> Option<String> {
    let color = value?.trim().trim_start_matches('#');

    let valid_length = matches!(color.len(), 3 | 4 | 6 | 8);
    if valid_length && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(color.to_ascii_lowercase())
    } else {
        None
    }
}

/// Override color if it is valid, the theme color otherwise
pub fn pick(override_color: Option<&str>, fallback: &str) -> String {
    sanitize_color(override_color).unwrap_or_else(|| fallback.to_string())
}
