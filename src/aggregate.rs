use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::{
    error::AppResult,
    models::{ContentItem, MediaType, MovieDetail, SearchPage, TrendingTrailer},
    normalize::{self, TypeSource, release_year},
    omdb::OmdbClient,
    tmdb::TmdbClient,
    watchlist::WatchlistStore,
    youtube::YoutubeClient,
};

pub async fn search(tmdb: &TmdbClient, query: &str, page: u32) -> AppResult<SearchPage> {
    let listing = tmdb.search_multi(query, page).await?;
    Ok(SearchPage {
        results: normalize::normalize(listing.results, TypeSource::PerRecord),
        total_pages: listing.total_pages,
        page,
    })
}

pub async fn trending(tmdb: &TmdbClient, media_type: MediaType) -> AppResult<Vec<ContentItem>> {
    let listing = tmdb.trending(media_type).await?;
    Ok(normalize::normalize(listing.results, TypeSource::Fixed(media_type)))
}

/// Catalog detail with secondary ratings attached on a best-effort basis.
/// Only the catalog call can fail the request.
pub async fn movie_detail(
    tmdb: &TmdbClient,
    omdb: &OmdbClient,
    id: i64,
) -> AppResult<MovieDetail> {
    let mut detail = tmdb.movie_details(id).await?;

    let Some(title) = detail.title.clone().filter(|t| !t.is_empty()) else {
        debug!(id, "detail has no title, skipping secondary ratings");
        return Ok(detail);
    };
    let year = detail.release_date.as_deref().and_then(release_year);

    match omdb.ratings(&title, year).await {
        Ok(ratings) => detail.secondary_ratings = Some(ratings),
        Err(err) => warn!(id, title = %title, error = %err, "secondary ratings unavailable"),
    }

    Ok(detail)
}

/// Recommendations seeded by the oldest watchlist entry, or trending when the
/// watchlist is empty.
pub async fn recommendations(
    tmdb: &TmdbClient,
    watchlist: &WatchlistStore,
    fallback: MediaType,
) -> AppResult<Vec<ContentItem>> {
    let Some(seed) = watchlist.first().await? else {
        debug!(%fallback, "watchlist empty, falling back to trending");
        return trending(tmdb, fallback).await;
    };

    let listing = tmdb.recommendations(seed.media_type, seed.movie_id).await?;
    Ok(normalize::normalize(listing.results, TypeSource::Fixed(seed.media_type)))
}

/// Top trending movies, each paired with a trailer id. Lookups run at most
/// `concurrency` at a time; a failed lookup leaves `video_id` empty.
pub async fn trending_trailers(
    tmdb: &TmdbClient,
    youtube: &YoutubeClient,
    count: usize,
    concurrency: usize,
) -> AppResult<Vec<TrendingTrailer>> {
    let mut items = trending(tmdb, MediaType::Movie).await?;
    items.truncate(count);

    debug!(count = items.len(), "looking up trending trailers");

    let trailers: Vec<TrendingTrailer> = stream::iter(items)
        .map(|item| async move {
            let year = release_year(&item.release_date);
            let video_id = match youtube.find_trailer(&item.title, year).await {
                Ok(found) => found.unwrap_or_default(),
                Err(err) => {
                    warn!(title = %item.title, error = %err, "trailer lookup failed");
                    String::new()
                },
            };
            TrendingTrailer {
                title: item.title,
                poster_path: item.poster_path,
                video_id,
                release_date: item.release_date,
                overview: item.overview,
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    Ok(trailers)
}
