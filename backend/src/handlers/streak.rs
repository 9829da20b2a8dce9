use actix_web::{web, Responder};
use chrono::Utc;
use serde::Deserialize;

use super::{error_response, svg_response, BADGE_CACHE_CONTROL};
use crate::errors::BadgeError;
use crate::services::streak_service::StreakService;
use crate::services::svg::{render_streak_card, StreakCardOptions};
use crate::utils::validators::{parse_date_range_years, parse_flag, require_username};

#[derive(Debug, Default, Deserialize)]
pub struct StreakQuery {
    pub username: Option<String>,
    pub refresh: Option<String>,
    pub date_range_years: Option<String>,
    pub theme: Option<String>,
    pub hide_border: Option<String>,
    pub hide_title: Option<String>,
    pub bg_color: Option<String>,
    pub stroke_color: Option<String>,
    pub ring_color: Option<String>,
    pub fire_color: Option<String>,
    pub curr_streak_color: Option<String>,
    pub longest_streak_color: Option<String>,
    pub width: Option<String>,
}

/// GET /api/streak
/// Streak card with the contribution graph
pub async fn get_streak(
    service: web::Data<StreakService>,
    query: web::Query<StreakQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match render(&service, &query).await {
        Ok(svg) => svg_response(svg, BADGE_CACHE_CONTROL),
        Err(e) => error_response(&e, query.width.as_deref()),
    }
}

async fn render(service: &StreakService, query: &StreakQuery) -> Result<String, BadgeError> {
    let username = require_username(query.username.as_deref())?;
    let refresh = parse_flag(query.refresh.as_deref());

    let report = service.get_streak_report(&username, refresh).await?;

    // The graph cannot show more years than were fetched
    let date_range_years = parse_date_range_years(query.date_range_years.as_deref())
        .min(service.history_years(Utc::now()));

    let options = StreakCardOptions {
        theme: query.theme.clone(),
        hide_border: parse_flag(query.hide_border.as_deref()),
        hide_title: parse_flag(query.hide_title.as_deref()),
        bg_color: query.bg_color.clone(),
        stroke_color: query.stroke_color.clone(),
        ring_color: query.ring_color.clone(),
        fire_color: query.fire_color.clone(),
        curr_streak_color: query.curr_streak_color.clone(),
        longest_streak_color: query.longest_streak_color.clone(),
        date_range_years,
    };

    Ok(render_streak_card(&report, &options))
}
