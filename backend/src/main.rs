mod cache;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use cache::{Cache, MemoryCache};
use services::contribution_fetcher::ContributionFetcher;
use services::github::{GitHubClient, GitHubTransport};
use services::languages::LanguagesAggregator;
use services::stats_aggregator::StatsAggregator;
use services::streak_service::StreakService;
use utils::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file FIRST before anything else
    dotenv::dotenv().ok();

    // Initialize logger with default level if RUST_LOG not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=================================================");
    println!("🚀 ActivityCard Backend Server");
    println!("=================================================");

    let config = Config::from_env()
        .context("Failed to load configuration")
        .map_err(std::io::Error::other)?;
    let host = config.host.clone();
    let port = config.port;

    println!("📝 Configuration loaded:");
    println!("   - Host: {}", host);
    println!("   - Port: {}", port);
    println!("   - GitHub API: {}", config.github_api_url);
    println!("   - Contribution history from: {}", config.contribution_start_year);
    println!("   - Cache TTL: {} ms", config.cache_ttl_ms);
    println!(
        "   - Placeholder data: {}",
        if config.allow_placeholder_data {
            "ENABLED"
        } else {
            "DISABLED"
        }
    );
    println!(
        "   - Log level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    );

    if config.github_token.is_none() {
        log::warn!("GITHUB_TOKEN is not set; GitHub GraphQL requests will be rejected");
    }

    let client = GitHubClient::from_config(&config)
        .context("Failed to create GitHub HTTP client")
        .map_err(std::io::Error::other)?;
    let transport: Arc<dyn GitHubTransport> = Arc::new(client);
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());

    let streaks = web::Data::new(StreakService::new(
        ContributionFetcher::new(transport.clone(), config.contribution_start_year),
        cache.clone(),
        config.cache_ttl_ms,
        config.allow_placeholder_data,
    ));
    let stats = web::Data::new(StatsAggregator::new(
        transport.clone(),
        cache.clone(),
        config.cache_ttl_ms,
    ));
    let languages = web::Data::new(LanguagesAggregator::new(
        transport,
        cache,
        config.cache_ttl_ms,
    ));

    println!("🌐 Starting HTTP server at http://{}:{}", host, port);
    println!("📍 Available endpoints:");
    println!("   - GET  http://{}:{}/api/streak?username=<login>", host, port);
    println!("   - GET  http://{}:{}/api/card?username=<login>", host, port);
    println!("   - GET  http://{}:{}/api/languages?username=<login>", host, port);
    println!("   - GET  http://{}:{}/health", host, port);
    println!("=================================================");

    log::info!("Server started at http://{}:{}", host, port);

    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![actix_web::http::header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(streaks.clone())
            .app_data(stats.clone())
            .app_data(languages.clone())
            .wrap(Logger::default())
            .wrap(cors) // CORS must be wrapped AFTER Logger to ensure headers are added to all responses
            .route("/health", web::get().to(handlers::health::health))
            .service(
                web::scope("/api")
                    .route("/streak", web::get().to(handlers::streak::get_streak))
                    .route("/card", web::get().to(handlers::card::get_card))
                    .route("/languages", web::get().to(handlers::languages::get_languages)),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
