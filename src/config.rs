use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub omdb_api_key: String,
    pub youtube_api_key: String,
    pub tmdb_base_url: String,
    pub omdb_base_url: String,
    pub youtube_base_url: String,
    pub database_url: String,
    pub http_timeout_secs: u64,
    pub trending_trailer_count: usize,
    pub trailer_concurrency: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let tmdb_api_key = required(&lookup, "TMDB_API_KEY")?;
        let omdb_api_key = required(&lookup, "OMDB_API_KEY")?;
        let youtube_api_key = required(&lookup, "YOUTUBE_API_KEY")?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 =
            lookup("PORT").unwrap_or_else(|| "8080".to_string()).parse().context("PORT")?;

        let tmdb_base_url =
            lookup("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let omdb_base_url =
            lookup("OMDB_BASE_URL").unwrap_or_else(|| "http://www.omdbapi.com".to_string());
        let youtube_base_url = lookup("YOUTUBE_BASE_URL")
            .unwrap_or_else(|| "https://www.googleapis.com/youtube/v3".to_string());

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://movielab.db?mode=rwc".to_string());

        let http_timeout_secs: u64 =
            lookup("HTTP_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        let trending_trailer_count: usize =
            lookup("TRENDING_TRAILER_COUNT").and_then(|s| s.parse().ok()).unwrap_or(4);

        let trailer_concurrency: usize =
            lookup("TRAILER_CONCURRENCY").and_then(|s| s.parse().ok()).unwrap_or(4);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            omdb_api_key,
            youtube_api_key,
            tmdb_base_url,
            omdb_base_url,
            youtube_base_url,
            database_url,
            http_timeout_secs,
            trending_trailer_count,
            trailer_concurrency: trailer_concurrency.max(1),
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{key} environment variable is required"))
}
