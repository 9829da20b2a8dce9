//! SVG card rendering.
//!
//! Cards are assembled with `format!` into a `String`. Every piece of user or
//! upstream text goes through [`escape_text`], and every color override goes
//! through [`themes::sanitize_color`] before it reaches the markup.

pub mod error_card;
pub mod languages_card;
pub mod stats_card;
pub mod streak_card;
pub mod themes;

use chrono::NaiveDate;
use std::borrow::Cow;

pub use error_card::render_error_card;
pub use languages_card::{render_languages_card, LanguagesCardOptions};
pub use stats_card::{render_stats_card, StatsCardOptions};
pub use streak_card::{render_streak_card, StreakCardOptions};

pub const CARD_WIDTH: u32 = 495;
pub const WIDE_CARD_WIDTH: u32 = 854;

const FONT_FAMILY: &str = "'Segoe UI', Ubuntu, Sans-Serif";

/// Escape text for use in SVG element content or attribute values
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// 1234 -> "1.2k"
pub fn format_number(value: u64) -> String {
    if value >= 1000 {
        format!("{:.1}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// "Jan 5, 2024", or empty when there is no date
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(_), Some(_)) => format!("{} - {}", format_date(start), format_date(end)),
        _ => String::new(),
    }
}

/// Card frame shared by every card type
fn background_rect(width: u32, stroke: &str, fill: &str, hide_border: bool) -> String {
    format!(
        r##"<rect data-testid="card-bg" x="0.5" y="0.5" rx="4.5" height="99%" stroke="#{}" width="{}" fill="#{}" stroke-opacity="{}"/>"##,
        stroke,
        width - 1,
        fill,
        if hide_border { 0 } else { 1 }
    )
}

const FADE_IN_STYLE: &str = ".stagger { opacity: 0; animation: fadeInAnimation 0.3s ease-in-out forwards; }
    @keyframes fadeInAnimation { from { opacity: 0; } to { opacity: 1; } }";
