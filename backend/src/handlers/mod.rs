pub mod card;
pub mod health;
pub mod languages;
pub mod streak;

use actix_web::http::header::{self, EntityTag, ETag};
use actix_web::HttpResponse;
use sha2::{Digest, Sha256};

use crate::errors::BadgeError;
use crate::services::svg::{render_error_card, CARD_WIDTH, WIDE_CARD_WIDTH};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Badge responses stay fresh for five minutes and may be served stale for an hour
pub const BADGE_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=3600";
pub const STATS_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=43200";
const ERROR_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// 200 response carrying a rendered card
pub fn svg_response(svg: String, cache_control: &str) -> HttpResponse {
    let etag = svg_etag(&svg);

    HttpResponse::Ok()
        .content_type(SVG_CONTENT_TYPE)
        .insert_header((header::CACHE_CONTROL, cache_control))
        .insert_header(ETag(EntityTag::new_strong(etag)))
        .body(svg)
}

/// Error card with the status code matching `err`
pub fn error_response(err: &BadgeError, width: Option<&str>) -> HttpResponse {
    match err {
        BadgeError::UpstreamUnavailable(reason) => log::error!("❌ {}", reason),
        other => log::warn!("⚠️  {}", other),
    }

    let width = if width == Some("wide") { WIDE_CARD_WIDTH } else { CARD_WIDTH };

    HttpResponse::build(err.status_code())
        .content_type(SVG_CONTENT_TYPE)
        .insert_header((header::CACHE_CONTROL, ERROR_CACHE_CONTROL))
        .body(render_error_card(&err.user_message(), width))
}

/// Hex SHA-256 of the card markup
pub fn svg_etag(svg: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(svg.as_bytes());
    hex::encode(hasher.finalize())
}
