use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Lenient mapping for per-record upstream values: only `tv` is a series.
    pub fn from_declared(value: &str) -> Self {
        if value == "tv" { MediaType::Tv } else { MediaType::Movie }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("type must be 'movie' or 'tv', got '{other}'")),
        }
    }
}

/// A catalog record in the shape served to the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub release_date: String,
    pub rating: f64,
    pub genre: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub results: Vec<ContentItem>,
    pub total_pages: u32,
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WatchlistEntry {
    pub id: i32,
    pub movie_id: i64,
    pub title: String,
    pub watched: bool,
    pub added_at: jiff::Timestamp,
    pub poster_path: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWatchlistEntry {
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: MediaType,
}

#[derive(Debug, Deserialize)]
pub struct WatchedUpdate {
    pub watched: bool,
}

#[derive(Debug, Serialize)]
pub struct TrailerResponse {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct TrendingTrailer {
    pub title: String,
    pub poster_path: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub release_date: String,
    pub overview: String,
}

/// Primary catalog detail payload. The fields the service reads are typed;
/// everything else passes through untouched in `extra`. A typed field that is
/// null or absent upstream is written back as null.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(rename = "secondaryRatings", default, skip_serializing_if = "Option::is_none")]
    pub secondary_ratings: Option<SecondaryRatings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Secondary ratings payload, keyed the way the ratings source spells them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SecondaryRatings {
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<RatingValue>,
    #[serde(rename = "Response", default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingValue {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detail_passes_unknown_fields_through() {
        let raw = json!({
            "id": 438631,
            "title": "Dune",
            "release_date": "2021-09-15",
            "runtime": 155,
            "genres": [{"id": 878, "name": "Science Fiction"}],
            "credits": {
                "cast": [{"id": 1190668, "name": "Timothée Chalamet", "character": "Paul", "order": 0}],
                "crew": []
            }
        });
        let detail: MovieDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.title.as_deref(), Some("Dune"));
        assert_eq!(detail.credits.as_ref().unwrap().cast[0].name, "Timothée Chalamet");

        let out = serde_json::to_value(&detail).unwrap();
        assert_eq!(out["runtime"], 155);
        assert_eq!(out["credits"]["crew"], json!([]));
        assert_eq!(out["credits"]["cast"][0]["order"], 0);
        assert!(out.get("secondaryRatings").is_none());
    }

    #[test]
    fn detail_keeps_null_catalog_fields() {
        let raw = json!({"id": 1, "title": "Untitled", "release_date": null, "genres": null});
        let detail: MovieDetail = serde_json::from_value(raw).unwrap();
        assert!(detail.release_date.is_none());

        let out = serde_json::to_value(&detail).unwrap();
        assert_eq!(out["title"], "Untitled");
        assert_eq!(out.get("release_date"), Some(&Value::Null));
        assert_eq!(out.get("genres"), Some(&Value::Null));
        assert!(out.get("secondaryRatings").is_none());
    }

    #[test]
    fn content_item_uses_dashboard_field_names() {
        let item = ContentItem {
            id: 1,
            title: "Dark".into(),
            overview: String::new(),
            poster_path: "/p.jpg".into(),
            release_date: "2017-12-01".into(),
            rating: 8.4,
            genre: String::new(),
            media_type: MediaType::Tv,
        };
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["type"], "tv");
        assert_eq!(out["poster_path"], "/p.jpg");
    }

    #[test]
    fn media_type_parsing_is_strict_but_declared_mapping_is_lenient() {
        assert_eq!("tv".parse::<MediaType>(), Ok(MediaType::Tv));
        assert!("person".parse::<MediaType>().is_err());
        assert_eq!(MediaType::from_declared("person"), MediaType::Movie);
        assert_eq!(MediaType::from_declared(""), MediaType::Movie);
    }
}
