use actix_web::{web, Responder};
use serde::Deserialize;

use super::{error_response, svg_response, STATS_CACHE_CONTROL};
use crate::errors::BadgeError;
use crate::services::stats_aggregator::StatsAggregator;
use crate::services::svg::{render_stats_card, StatsCardOptions};
use crate::utils::validators::{parse_flag, parse_flag_or, parse_list, require_username};

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub username: Option<String>,
    pub refresh: Option<String>,
    pub theme: Option<String>,
    pub hide: Option<String>,
    pub hide_rank: Option<String>,
    pub hide_title: Option<String>,
    pub hide_border: Option<String>,
    pub show_icons: Option<String>,
    pub custom_title: Option<String>,
    pub bg_color: Option<String>,
    pub title_color: Option<String>,
    pub text_color: Option<String>,
    pub icon_color: Option<String>,
    pub border_color: Option<String>,
    pub width: Option<String>,
}

/// GET /api/card
/// Profile stats card with rank
pub async fn get_card(
    aggregator: web::Data<StatsAggregator>,
    query: web::Query<CardQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match render(&aggregator, &query).await {
        Ok(svg) => svg_response(svg, STATS_CACHE_CONTROL),
        Err(e) => error_response(&e, query.width.as_deref()),
    }
}

async fn render(aggregator: &StatsAggregator, query: &CardQuery) -> Result<String, BadgeError> {
    let username = require_username(query.username.as_deref())?;
    let refresh = parse_flag(query.refresh.as_deref());

    let stats = aggregator.get_user_stats(&username, refresh).await?;

    let options = StatsCardOptions {
        theme: query.theme.clone(),
        hide: parse_list(query.hide.as_deref()),
        hide_rank: parse_flag(query.hide_rank.as_deref()),
        hide_title: parse_flag(query.hide_title.as_deref()),
        hide_border: parse_flag(query.hide_border.as_deref()),
        show_icons: parse_flag_or(query.show_icons.as_deref(), true),
        custom_title: query.custom_title.clone(),
        bg_color: query.bg_color.clone(),
        title_color: query.title_color.clone(),
        text_color: query.text_color.clone(),
        icon_color: query.icon_color.clone(),
        border_color: query.border_color.clone(),
    };

    Ok(render_stats_card(&stats, &options))
}
