mod aggregate;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod normalize;
mod omdb;
mod routes;
mod tmdb;
mod watchlist;
mod youtube;

use std::{sync::Arc, time::Duration};

use axum::http::{Method, header};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config, omdb::OmdbClient, tmdb::TmdbClient, watchlist::WatchlistStore,
    youtube::YoutubeClient,
};

pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: TmdbClient,
    pub omdb: OmdbClient,
    pub youtube: YoutubeClient,
    pub watchlist: WatchlistStore,
}

impl AppState {
    pub fn new(config: Arc<Config>, http: reqwest::Client, db: DatabaseConnection) -> Self {
        let tmdb = TmdbClient::new(
            http.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
        );
        let omdb = OmdbClient::new(
            http.clone(),
            config.omdb_api_key.clone(),
            config.omdb_base_url.clone(),
        );
        let youtube = YoutubeClient::new(
            http,
            config.youtube_api_key.clone(),
            config.youtube_base_url.clone(),
        );

        Self { config, tmdb, omdb, youtube, watchlist: WatchlistStore::new(db) }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movielab=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("movielab/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;

    let state = Arc::new(AppState::new(config.clone(), http, db));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = routes::router(state).layer(cors).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
