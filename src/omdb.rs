use tracing::debug;

use crate::{error::AppResult, models::SecondaryRatings};

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self { client, api_key, base_url }
    }

    /// Looks up ratings by exact title, narrowed by year when one is known.
    /// A `"Response": "False"` body counts as a failed lookup.
    pub async fn ratings(&self, title: &str, year: Option<&str>) -> AppResult<SecondaryRatings> {
        debug!(title, year, "looking up secondary ratings");

        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let mut req =
            self.client.get(url).query(&[("t", title), ("apikey", self.api_key.as_str())]);
        if let Some(year) = year {
            req = req.query(&[("y", year)]);
        }

        let ratings: SecondaryRatings = req.send().await?.error_for_status()?.json().await?;
        if ratings.response.as_deref() == Some("False") {
            let reason = ratings
                .extra
                .get("Error")
                .and_then(|v| v.as_str())
                .unwrap_or("no match")
                .to_string();
            return Err(anyhow::anyhow!("ratings lookup for '{title}' failed: {reason}").into());
        }
        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    #[tokio::test]
    async fn decodes_ratings_and_sends_year() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("t".into(), "Dune".into()),
                Matcher::UrlEncoded("y".into(), "2021".into()),
                Matcher::UrlEncoded("apikey".into(), "k".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Title":"Dune","Year":"2021","imdbRating":"8.0","Ratings":[{"Source":"Rotten Tomatoes","Value":"83%"}],"Metascore":"74","Response":"True"}"#,
            )
            .create_async()
            .await;

        let client = OmdbClient::new(reqwest::Client::new(), "k".into(), server.url());
        let ratings = client.ratings("Dune", Some("2021")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(ratings.imdb_rating.as_deref(), Some("8.0"));
        assert_eq!(ratings.ratings[0].value, "83%");
        assert_eq!(ratings.extra["Metascore"], "74");
    }

    #[tokio::test]
    async fn not_found_response_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let client = OmdbClient::new(reqwest::Client::new(), "k".into(), server.url());
        let err = client.ratings("Nope", None).await.unwrap_err();
        assert!(err.to_string().contains("Movie not found!"));
    }
}
