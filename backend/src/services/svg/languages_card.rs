use super::themes::{find_theme, pick, sanitize_color};
use super::{background_rect, escape_text, CARD_WIDTH, FADE_IN_STYLE, FONT_FAMILY};
use crate::models::TopLanguages;

const BAR_WIDTH: f64 = 445.0;
const ROW_HEIGHT: u32 = 25;

#[derive(Clone, Debug, Default)]
pub struct LanguagesCardOptions {
    pub theme: Option<String>,
    pub hide_border: bool,
    pub hide_title: bool,
    pub bg_color: Option<String>,
    pub title_color: Option<String>,
    pub text_color: Option<String>,
    pub border_color: Option<String>,
}

/// Stacked percentage bar with a two-column legend below it
pub fn render_languages_card(top: &TopLanguages, options: &LanguagesCardOptions) -> String {
    let base = find_theme(options.theme.as_deref());
    let title_color = pick(options.title_color.as_deref(), base.title_color);
    let text_color = pick(options.text_color.as_deref(), base.text_color);
    let bg_color = pick(options.bg_color.as_deref(), base.bg_color);
    let border_color = pick(options.border_color.as_deref(), base.border_color);

    let width = CARD_WIDTH;
    let rows = (top.languages.len() as u32).div_ceil(2);
    let body_offset = if options.hide_title { 25 } else { 55 };
    let height = body_offset + 30 + rows.max(1) * ROW_HEIGHT + 10;

    let title = if options.hide_title {
        String::new()
    } else {
        r#"<g transform="translate(25, 35)"><text x="0" y="0" class="header">Most Used Languages</text></g>"#
            .to_string()
    };

    let mut bar = String::new();
    let mut legend = String::new();
    let mut offset = 0.0;

    for (index, language) in top.languages.iter().enumerate() {
        let color = sanitize_color(Some(&language.color)).unwrap_or_else(|| "858585".to_string());
        let segment = BAR_WIDTH * language.percentage / 100.0;

        bar.push_str(&format!(
            r##"<rect x="{:.2}" y="0" width="{:.2}" height="8" fill="#{}"/>"##,
            offset, segment, color
        ));
        offset += segment;

        let x = if index % 2 == 0 { 0 } else { 230 };
        let y = 30 + (index as u32 / 2) * ROW_HEIGHT;
        legend.push_str(&format!(
            r##"
    <g transform="translate({x}, {y})" class="stagger" style="animation-delay: {delay}ms">
      <circle cx="5" cy="6" r="5" fill="#{color}"/>
      <text x="15" y="10" class="lang-name">{name} {percentage:.2}%</text>
    </g>"##,
            x = x,
            y = y,
            delay = index * 150,
            color = color,
            name = escape_text(&language.name),
            percentage = language.percentage,
        ));
    }

    let body = if top.languages.is_empty() {
        r#"<text x="0" y="20" class="lang-name">No language data</text>"#.to_string()
    } else {
        format!(
            r#"<mask id="bar-mask"><rect x="0" y="0" width="{bar_width}" height="8" fill="white" rx="5"/></mask>
    <g mask="url(#bar-mask)">{bar}</g>{legend}"#,
            bar_width = BAR_WIDTH,
            bar = bar,
            legend = legend,
        )
    };

    format!(
        r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="http://www.w3.org/2000/svg">
  <style>
    .header {{ font: 600 18px {font}; fill: #{title_color}; }}
    .lang-name {{ font: 400 11px {font}; fill: #{text_color}; }}
    {fade}
  </style>
  {background}
  {title}
  <g transform="translate(25, {body_offset})">
    {body}
  </g>
</svg>"##,
        width = width,
        height = height,
        font = FONT_FAMILY,
        title_color = title_color,
        text_color = text_color,
        fade = FADE_IN_STYLE,
        background = background_rect(width, &border_color, &bg_color, options.hide_border),
        title = title,
        body_offset = body_offset,
        body = body,
    )
}
