use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AppResult;

pub struct YoutubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self { client, api_key, base_url }
    }

    /// Returns the video id of the top search hit for the title's trailer, if any.
    /// Error statuses with a JSON body (quota, bad key) count as no hit.
    pub async fn find_trailer(&self, title: &str, year: Option<&str>) -> AppResult<Option<String>> {
        let query = trailer_query(title, year);
        debug!(query = %query, "searching for trailer");

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let body: Value = self
            .client
            .get(url)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("maxResults", "1"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        Ok(first_video_id(body))
    }
}

pub fn trailer_query(title: &str, year: Option<&str>) -> String {
    match year.map(str::trim).filter(|y| !y.is_empty()) {
        Some(year) => format!("{title} {year} official trailer"),
        None => format!("{title} official trailer"),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: String,
}

// A body that parses as JSON but not in the expected shape means "no hit".
fn first_video_id(body: Value) -> Option<String> {
    let resp: SearchResponse = serde_json::from_value(body).ok()?;
    resp.items.into_iter().next().map(|item| item.id.video_id)
}
