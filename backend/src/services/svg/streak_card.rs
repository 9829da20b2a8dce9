use chrono::Datelike;

use super::themes::{find_theme, pick};
use super::{
    background_rect, escape_text, format_date, format_date_range, format_number, CARD_WIDTH,
    FADE_IN_STYLE, FONT_FAMILY,
};
use crate::models::{ContributionDay, StreakReport};

const WEEKS_PER_YEAR: usize = 53;
const CELL_SIZE: u32 = 6;
const CELL_GAP: u32 = 2;
const GRAPH_MARGIN: u32 = 25;
const DEFAULT_FIRE_COLOR: &str = "fb8c00";

const FIRE_PATH: &str = "M8.5 14.5A2.5 2.5 0 0 0 11 12c0-1.38-.5-2-1-3-1.072-2.143-.224-4.054 2-6 .5 2.5 2 4.9 4 6.5 2 1.6 3 3.5 3 5.5a7 7 0 1 1-14 0c0-1.153.433-2.294 1-3a2.5 2.5 0 0 0 2.5 2.5z";

/// Display options for the streak card, straight from the query string
#[derive(Clone, Debug, Default)]
pub struct StreakCardOptions {
    pub theme: Option<String>,
    pub hide_border: bool,
    pub hide_title: bool,
    pub bg_color: Option<String>,
    pub stroke_color: Option<String>,
    pub ring_color: Option<String>,
    pub fire_color: Option<String>,
    pub curr_streak_color: Option<String>,
    pub longest_streak_color: Option<String>,
    /// Years of history drawn in the graph
    pub date_range_years: usize,
}

struct StreakPalette {
    bg: String,
    stroke: String,
    ring: String,
    fire: String,
    current: String,
    longest: String,
}

impl StreakPalette {
    fn resolve(options: &StreakCardOptions) -> Self {
        let base = find_theme(options.theme.as_deref());

        Self {
            bg: pick(options.bg_color.as_deref(), base.bg_color),
            stroke: pick(options.stroke_color.as_deref(), base.title_color),
            ring: pick(options.ring_color.as_deref(), base.icon_color),
            fire: pick(options.fire_color.as_deref(), DEFAULT_FIRE_COLOR),
            current: pick(options.curr_streak_color.as_deref(), base.title_color),
            longest: pick(options.longest_streak_color.as_deref(), base.icon_color),
        }
    }

    fn empty_cell(&self) -> &'static str {
        if self.bg == "ffffff" || self.bg == "fff" {
            "ebedf0"
        } else {
            "2d333b"
        }
    }
}

pub fn render_streak_card(report: &StreakReport, options: &StreakCardOptions) -> String {
    let palette = StreakPalette::resolve(options);
    let stats = &report.stats;

    let max_weeks = WEEKS_PER_YEAR * options.date_range_years.max(1);
    let weeks = group_weeks(&report.contributions, max_weeks);
    let graph_width = weeks.len() as u32 * (CELL_SIZE + CELL_GAP);

    let width = CARD_WIDTH.max(graph_width + 2 * GRAPH_MARGIN);
    let title_offset = if options.hide_title { 0 } else { 30 };
    let height = if options.hide_title { 265 } else { 295 };
    let center = width / 2;

    let title = if options.hide_title {
        String::new()
    } else {
        format!(
            r#"<g transform="translate(25, 30)"><text x="0" y="0" class="header">{}'s GitHub Streak</text></g>"#,
            escape_text(&stats.username)
        )
    };

    let totals = format!(
        r##"<g transform="translate(-155, 0)" class="stagger">
      <circle cx="0" cy="0" r="40" fill="#{ring}" opacity="0.2" filter="url(#shadow)"/>
      <text x="0" y="5" text-anchor="middle" dominant-baseline="middle" class="stat-value">{total}</text>
      <text x="0" y="50" text-anchor="middle" class="stat-label">Total Contributions</text>
      <text x="0" y="63" text-anchor="middle" class="date-text">{since}</text>
    </g>"##,
        ring = palette.ring,
        total = format_number(stats.total_contributions),
        since = match stats.first_contribution {
            Some(_) => format!("{} - Present", format_date(stats.first_contribution)),
            None => String::new(),
        },
    );

    let current = format!(
        r##"<g transform="translate(0, 0)" class="stagger" style="animation-delay: 150ms">
      <circle cx="0" cy="0" r="55" fill="#{fire}" opacity="0.2" filter="url(#shadow)"/>
      <g transform="scale(4.2) translate(-12, -10.2)">
        <path d="{path}" fill="#{fire}" fill-opacity="0.1" stroke="#{fire}" stroke-width="0.4" stroke-opacity="0.4" stroke-linejoin="round" stroke-linecap="round"/>
      </g>
      <text x="0" y="15" text-anchor="middle" dominant-baseline="middle" class="stat-value">{streak}</text>
      <text x="0" y="70" text-anchor="middle" class="stat-label">Current Streak</text>
      <text x="0" y="83" text-anchor="middle" class="date-text">{range}</text>
    </g>"##,
        fire = palette.fire,
        path = FIRE_PATH,
        streak = stats.current_streak,
        range = format_date_range(stats.current_streak_start, stats.current_streak_end),
    );

    let longest = format!(
        r##"<g transform="translate(155, 0)" class="stagger" style="animation-delay: 300ms">
      <circle cx="0" cy="0" r="40" fill="#{color}" opacity="0.2" filter="url(#shadow)"/>
      <text x="0" y="5" text-anchor="middle" dominant-baseline="middle" class="stat-value" style="fill: #{color}">{streak}</text>
      <text x="0" y="50" text-anchor="middle" class="stat-label">Longest Streak</text>
      <text x="0" y="63" text-anchor="middle" class="date-text">{range}</text>
    </g>"##,
        color = palette.longest,
        streak = stats.longest_streak,
        range = format_date_range(stats.longest_streak_start, stats.longest_streak_end),
    );

    let graph = render_graph(&weeks, &palette, report.placeholder, 175 + title_offset, width);

    format!(
        r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <filter id="shadow" x="-50%" y="-50%" width="200%" height="200%">
      <feDropShadow dx="0" dy="4" stdDeviation="5" flood-color="#000" flood-opacity="0.2"/>
    </filter>
  </defs>
  <style>
    .header {{ font: 600 18px {font}; fill: #{stroke}; }}
    .stat-value {{ font: 700 20px {font}; fill: #{current}; }}
    .stat-label {{ font: 600 12px {font}; fill: #{stroke}; }}
    .date-text {{ font: 400 9px {font}; fill: #{stroke}; opacity: 0.7; }}
    .section-title {{ font: 600 14px {font}; fill: #{stroke}; }}
    {fade}
  </style>
  {background}
  {title}
  <g transform="translate({center}, {stats_y})">
    {totals}
    {current_streak}
    {longest}
  </g>
  {graph}
</svg>"##,
        width = width,
        height = height,
        font = FONT_FAMILY,
        stroke = palette.stroke,
        current = palette.current,
        fade = FADE_IN_STYLE,
        background = background_rect(width, &palette.stroke, &palette.bg, options.hide_border),
        title = title,
        center = center,
        stats_y = 65 + title_offset,
        totals = totals,
        current_streak = current,
        longest = longest,
        graph = graph,
    )
}

/// Columns of seven days starting on Sunday. `None` pads the first week
/// before the earliest day. Only the most recent `max_weeks` are kept.
fn group_weeks(days: &[ContributionDay], max_weeks: usize) -> Vec<Vec<Option<ContributionDay>>> {
    let Some(first) = days.first() else {
        return Vec::new();
    };

    let padding = first.date.weekday().num_days_from_sunday() as usize;
    let cells: Vec<Option<ContributionDay>> = std::iter::repeat(None)
        .take(padding)
        .chain(days.iter().copied().map(Some))
        .collect();

    let weeks: Vec<Vec<Option<ContributionDay>>> =
        cells.chunks(7).map(|week| week.to_vec()).collect();
    let skip = weeks.len().saturating_sub(max_weeks);

    weeks.into_iter().skip(skip).collect()
}

fn contribution_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

fn render_graph(
    weeks: &[Vec<Option<ContributionDay>>],
    palette: &StreakPalette,
    placeholder: bool,
    y_offset: u32,
    width: u32,
) -> String {
    let graph_width = weeks.len() as u32 * (CELL_SIZE + CELL_GAP);
    let start_x = width.saturating_sub(graph_width) / 2;

    let heading = if placeholder {
        "Contribution Activity (sample data)"
    } else {
        "Contribution Activity"
    };

    let mut svg = format!(
        r#"<g transform="translate(0, {})"><text x="{}" y="0" text-anchor="middle" class="section-title">{}</text>"#,
        y_offset,
        width / 2,
        heading
    );

    for (week_idx, week) in weeks.iter().enumerate() {
        for (day_idx, day) in week.iter().enumerate() {
            // Padding before the first day
            let Some(day) = day else { continue };

            let x = start_x + week_idx as u32 * (CELL_SIZE + CELL_GAP);
            let y = 20 + day_idx as u32 * (CELL_SIZE + CELL_GAP);

            let (fill, opacity) = match contribution_level(day.count) {
                0 => (palette.empty_cell(), "1"),
                1 => (palette.ring.as_str(), "0.25"),
                2 => (palette.ring.as_str(), "0.5"),
                3 => (palette.ring.as_str(), "0.75"),
                _ => (palette.ring.as_str(), "1"),
            };

            svg.push_str(&format!(
                r##"<rect class="day" x="{}" y="{}" width="{}" height="{}" fill="#{}" fill-opacity="{}" rx="1"><title>{}: {}</title></rect>"##,
                x,
                y,
                CELL_SIZE,
                CELL_SIZE,
                fill,
                opacity,
                day.date.format("%Y-%m-%d"),
                day.count
            ));
        }
    }

    svg.push_str("</g>");
    svg
}
