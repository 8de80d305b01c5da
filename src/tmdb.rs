use serde::Deserialize;
use tracing::debug;

use crate::{
    error::AppResult,
    models::{MediaType, MovieDetail},
};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self { client, api_key, base_url }
    }

    pub async fn search_multi(&self, query: &str, page: u32) -> AppResult<Listing> {
        debug!(query, page, "searching catalog");
        self.get_json("search/multi", &[("query", query.to_string()), ("page", page.to_string())])
            .await
    }

    pub async fn trending(&self, media_type: MediaType) -> AppResult<Listing> {
        debug!(%media_type, "fetching trending");
        self.get_json(&format!("trending/{media_type}/week"), &[("page", "1".to_string())]).await
    }

    pub async fn recommendations(&self, media_type: MediaType, id: i64) -> AppResult<Listing> {
        debug!(%media_type, id, "fetching recommendations");
        self.get_json(&format!("{media_type}/{id}/recommendations"), &[]).await
    }

    pub async fn movie_details(&self, id: i64) -> AppResult<MovieDetail> {
        debug!(id, "fetching movie details");
        self.get_json(&format!("movie/{id}"), &[("append_to_response", "credits".to_string())])
            .await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .client
            .get(url)
            .query(&[("api_key", &self.api_key)])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }
}

/// A paged listing as returned by search, trending and recommendations.
#[derive(Debug, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub results: Vec<RawRecord>,
    #[serde(default)]
    pub total_pages: u32,
}

/// One listing record. Movies carry `title`/`release_date`, series carry
/// `name`/`first_air_date`; multi-type search adds `media_type`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub media_type: Option<String>,
}
