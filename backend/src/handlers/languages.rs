use actix_web::{web, Responder};
use serde::Deserialize;

use super::{error_response, svg_response, BADGE_CACHE_CONTROL};
use crate::errors::BadgeError;
use crate::services::languages::LanguagesAggregator;
use crate::services::svg::{render_languages_card, LanguagesCardOptions};
use crate::utils::validators::{parse_flag, parse_langs_count, require_username};

#[derive(Debug, Default, Deserialize)]
pub struct LanguagesQuery {
    pub username: Option<String>,
    pub refresh: Option<String>,
    pub langs_count: Option<String>,
    pub theme: Option<String>,
    pub hide_border: Option<String>,
    pub hide_title: Option<String>,
    pub bg_color: Option<String>,
    pub title_color: Option<String>,
    pub text_color: Option<String>,
    pub border_color: Option<String>,
    pub width: Option<String>,
}

/// GET /api/languages
pub async fn get_languages(
    aggregator: web::Data<LanguagesAggregator>,
    query: web::Query<LanguagesQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match render(&aggregator, &query).await {
        Ok(svg) => svg_response(svg, BADGE_CACHE_CONTROL),
        Err(e) => error_response(&e, query.width.as_deref()),
    }
}

async fn render(
    aggregator: &LanguagesAggregator,
    query: &LanguagesQuery,
) -> Result<String, BadgeError> {
    let username = require_username(query.username.as_deref())?;
    let refresh = parse_flag(query.refresh.as_deref());
    let limit = parse_langs_count(query.langs_count.as_deref());

    let top = aggregator.get_top_languages(&username, refresh, limit).await?;

    let options = LanguagesCardOptions {
        theme: query.theme.clone(),
        hide_border: parse_flag(query.hide_border.as_deref()),
        hide_title: parse_flag(query.hide_title.as_deref()),
        bg_color: query.bg_color.clone(),
        title_color: query.title_color.clone(),
        text_color: query.text_color.clone(),
        border_color: query.border_color.clone(),
    };

    Ok(render_languages_card(&top, &options))
}
