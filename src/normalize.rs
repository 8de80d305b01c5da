//! Maps catalog listing records onto [`ContentItem`].
//!
//! Records are mapped one to one and in upstream order. Title and release
//! date prefer the movie field and fall back to the series field; neither
//! lookup ever fails, an absent value becomes an empty string.

use crate::{
    models::{ContentItem, MediaType},
    tmdb::RawRecord,
};

/// Where an item's media type comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSource {
    /// Multi-type listings: trust the record's own `media_type`.
    PerRecord,
    /// Single-type listings: the endpoint decides, the record field is ignored.
    Fixed(MediaType),
}

pub fn normalize(records: Vec<RawRecord>, types: TypeSource) -> Vec<ContentItem> {
    records.into_iter().map(|r| normalize_record(r, types)).collect()
}

pub fn normalize_record(record: RawRecord, types: TypeSource) -> ContentItem {
    let media_type = match types {
        TypeSource::PerRecord => {
            MediaType::from_declared(record.media_type.as_deref().unwrap_or_default())
        },
        TypeSource::Fixed(t) => t,
    };

    ContentItem {
        id: record.id,
        title: first_non_empty(record.title, record.name),
        overview: record.overview.unwrap_or_default(),
        poster_path: record.poster_path.unwrap_or_default(),
        release_date: first_non_empty(record.release_date, record.first_air_date),
        rating: record.vote_average.unwrap_or(0.0),
        genre: String::new(),
        media_type,
    }
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> String {
    primary.filter(|s| !s.is_empty()).or(fallback).unwrap_or_default()
}

/// Leading four-digit year of a date string, if it has one.
pub fn release_year(date: &str) -> Option<&str> {
    let year = date.get(..4)?;
    year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
}
