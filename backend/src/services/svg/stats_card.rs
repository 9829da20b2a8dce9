use super::themes::{find_theme, pick};
use super::{background_rect, escape_text, format_number, CARD_WIDTH, FADE_IN_STYLE, FONT_FAMILY};
use crate::models::{Rank, UserStats};

/// Display options for the profile stats card
#[derive(Clone, Debug)]
pub struct StatsCardOptions {
    pub theme: Option<String>,
    /// Stat keys to leave out: stars, commits, prs, issues, contribs
    pub hide: Vec<String>,
    pub hide_rank: bool,
    pub hide_title: bool,
    pub hide_border: bool,
    pub show_icons: bool,
    pub custom_title: Option<String>,
    pub bg_color: Option<String>,
    pub title_color: Option<String>,
    pub text_color: Option<String>,
    pub icon_color: Option<String>,
    pub border_color: Option<String>,
}

impl Default for StatsCardOptions {
    fn default() -> Self {
        Self {
            theme: None,
            hide: Vec::new(),
            hide_rank: false,
            hide_title: false,
            hide_border: false,
            show_icons: true,
            custom_title: None,
            bg_color: None,
            title_color: None,
            text_color: None,
            icon_color: None,
            border_color: None,
        }
    }
}

struct StatsPalette {
    title: String,
    text: String,
    icon: String,
    bg: String,
    border: String,
}

struct StatLine {
    key: &'static str,
    label: &'static str,
    value: u64,
    icon: &'static str,
}

const STAR_ICON: &str = r#"<path d="M8 .25a.75.75 0 01.673.418l1.882 3.815 4.21.612a.75.75 0 01.416 1.279l-3.046 2.97.719 4.192a.75.75 0 01-1.088.791L8 12.347l-3.766 1.98a.75.75 0 01-1.088-.79l.72-4.194L.818 6.374a.75.75 0 01.416-1.28l4.21-.611L7.327.668A.75.75 0 018 .25z"/>"#;
const COMMIT_ICON: &str = r#"<path fill-rule="evenodd" d="M10.5 7.75a2.5 2.5 0 11-5 0 2.5 2.5 0 015 0zm1.43.75a4.002 4.002 0 01-7.86 0H.75a.75.75 0 110-1.5h3.32a4.001 4.001 0 017.86 0h3.32a.75.75 0 110 1.5h-3.32z"/>"#;
const PR_ICON: &str = r#"<path fill-rule="evenodd" d="M7.177 3.073L9.573.677A.25.25 0 0110 .854v4.792a.25.25 0 01-.427.177L7.177 3.427a.25.25 0 010-.354zM3.75 2.5a.75.75 0 100 1.5.75.75 0 000-1.5zm-2.25.75a2.25 2.25 0 113 2.122v5.256a2.251 2.251 0 11-1.5 0V5.372A2.25 2.25 0 011.5 3.25zM11 2.5h-1V4h1a1 1 0 011 1v5.628a2.251 2.251 0 101.5 0V5A2.5 2.5 0 0011 2.5zm1 10.25a.75.75 0 111.5 0 .75.75 0 01-1.5 0zM3.75 12a.75.75 0 100 1.5.75.75 0 000-1.5z"/>"#;
const ISSUE_ICON: &str = r#"<path d="M8 9.5a1.5 1.5 0 100-3 1.5 1.5 0 000 3z"/><path fill-rule="evenodd" d="M8 0a8 8 0 100 16A8 8 0 008 0zM1.5 8a6.5 6.5 0 1113 0 6.5 6.5 0 01-13 0z"/>"#;
const REPO_ICON: &str = r#"<path fill-rule="evenodd" d="M2 2.5A2.5 2.5 0 014.5 0h8.75a.75.75 0 01.75.75v12.5a.75.75 0 01-.75.75h-2.5a.75.75 0 110-1.5h1.75v-2h-8a1 1 0 00-.714 1.7.75.75 0 01-1.072 1.05A2.495 2.495 0 012 11.5v-9zm10.5-1V9h-8c-.356 0-.694.074-1 .208V2.5a1 1 0 011-1h8z"/>"#;

pub fn render_stats_card(stats: &UserStats, options: &StatsCardOptions) -> String {
    let base = find_theme(options.theme.as_deref());
    let palette = StatsPalette {
        title: pick(options.title_color.as_deref(), base.title_color),
        text: pick(options.text_color.as_deref(), base.text_color),
        icon: pick(options.icon_color.as_deref(), base.icon_color),
        bg: pick(options.bg_color.as_deref(), base.bg_color),
        border: pick(options.border_color.as_deref(), base.border_color),
    };

    let width = CARD_WIDTH;
    let height = match (options.hide_rank, options.hide_title) {
        (true, true) => 135,
        (true, false) | (false, true) => 165,
        (false, false) => 195,
    };
    let stats_offset = if options.hide_title { 30 } else { 60 };

    let title = if options.hide_title {
        String::new()
    } else {
        let text = match options.custom_title.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => escape_text(custom).into_owned(),
            _ => format!("{}'s GitHub Stats", escape_text(&stats.name)),
        };
        format!(
            r#"<g transform="translate(25, 30)"><text x="0" y="0" class="header">{}</text></g>"#,
            text
        )
    };

    let rank = if options.hide_rank {
        String::new()
    } else {
        render_rank_circle(stats.rank, &palette, width)
    };

    format!(
        r##"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="http://www.w3.org/2000/svg">
  <style>
    .header {{ font: 600 18px {font}; fill: #{title_color}; }}
    .stat-label {{ font: 400 12px {font}; fill: #{text_color}; }}
    .stat-value {{ font: 700 14px {font}; fill: #{title_color}; }}
    {fade}
  </style>
  {background}
  {title}
  <g transform="translate(0, {stats_offset})">{lines}
  </g>
  {rank}
</svg>"##,
        width = width,
        height = height,
        font = FONT_FAMILY,
        title_color = palette.title,
        text_color = palette.text,
        fade = FADE_IN_STYLE,
        background = background_rect(width, &palette.border, &palette.bg, options.hide_border),
        title = title,
        stats_offset = stats_offset,
        lines = render_stat_lines(stats, options, &palette),
        rank = rank,
    )
}

fn visible_lines(stats: &UserStats, hide: &[String]) -> Vec<StatLine> {
    let lines = [
        StatLine {
            key: "stars",
            label: "Total Stars",
            value: stats.total_stars,
            icon: STAR_ICON,
        },
        StatLine {
            key: "commits",
            label: "Total Commits",
            value: stats.total_commits,
            icon: COMMIT_ICON,
        },
        StatLine {
            key: "prs",
            label: "Total PRs",
            value: stats.total_prs,
            icon: PR_ICON,
        },
        StatLine {
            key: "issues",
            label: "Total Issues",
            value: stats.total_issues,
            icon: ISSUE_ICON,
        },
        StatLine {
            key: "contribs",
            label: "Contributed to",
            value: stats.contributed_to,
            icon: REPO_ICON,
        },
    ];

    lines
        .into_iter()
        .filter(|line| !hide.iter().any(|h| h.eq_ignore_ascii_case(line.key)))
        .collect()
}

/// Two columns, 35px per row
fn render_stat_lines(
    stats: &UserStats,
    options: &StatsCardOptions,
    palette: &StatsPalette,
) -> String {
    let text_x = if options.show_icons { 22 } else { 0 };

    visible_lines(stats, &options.hide)
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let x = if index % 2 == 0 { 30 } else { 260 };
            let y = 15 + (index / 2) * 35;
            let icon = if options.show_icons {
                format!(
                    r##"<g transform="translate(0, -8)"><svg x="0" y="0" width="16" height="16" viewBox="0 0 16 16" fill="#{}">{}</svg></g>"##,
                    palette.icon, line.icon
                )
            } else {
                String::new()
            };

            format!(
                r#"
    <g transform="translate({x}, {y})" class="stagger" style="animation-delay: {delay}ms">
      {icon}
      <text class="stat-label" x="{text_x}" y="0">{label}:</text>
      <text class="stat-value" x="{text_x}" y="14">{value}</text>
    </g>"#,
                x = x,
                y = y,
                delay = index * 150,
                icon = icon,
                text_x = text_x,
                label = line.label,
                value = format_number(line.value),
            )
        })
        .collect()
}

fn render_rank_circle(rank: Rank, palette: &StatsPalette, card_width: u32) -> String {
    format!(
        r##"<g transform="translate({x}, 50)">
    <circle cx="0" cy="0" r="40" stroke="#{border}" stroke-width="1" fill="#{bg}" opacity="0.8"/>
    <text x="0" y="2" text-anchor="middle" dominant-baseline="middle" font-family="Segoe UI, Ubuntu, Sans-Serif" font-size="26" font-weight="700" fill="#{title}">{rank}</text>
    <text x="0" y="24" text-anchor="middle" font-family="Segoe UI, Ubuntu, Sans-Serif" font-size="11" font-weight="600" fill="#{text}">Rank</text>
  </g>"##,
        x = card_width - 65,
        border = palette.border,
        bg = palette.bg,
        title = palette.title,
        rank = rank,
        text = palette.text,
    )
}
