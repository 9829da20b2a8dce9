pub mod contribution_fetcher;
pub mod contribution_normalizer;
pub mod github;
pub mod languages;
pub mod placeholder;
pub mod stats_aggregator;
pub mod streak_calculator;
pub mod streak_service;
pub mod svg;
