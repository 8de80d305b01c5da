use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;

use crate::{
    AppState, aggregate,
    error::{AppError, AppResult},
    models::{
        ContentItem, MediaType, MovieDetail, NewWatchlistEntry, SearchPage, TrailerResponse,
        TrendingTrailer, WatchedUpdate, WatchlistEntry,
    },
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/trending", get(trending))
        .route("/api/movie/{id}", get(movie_detail))
        .route(
            "/api/watchlist",
            get(list_watchlist).post(add_to_watchlist).delete(clear_watchlist),
        )
        .route("/api/watchlist/{id}", put(set_watched).delete(remove_from_watchlist))
        .route("/api/recommendations", get(recommendations))
        .route("/api/trailer", get(trailer))
        .route("/api/trending-trailers", get(trending_trailers))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    page: Option<String>,
}

impl SearchQuery {
    fn page(&self) -> AppResult<u32> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| AppError::bad_request("page must be a positive integer")),
        }
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<SearchPage>> {
    let query = q.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::bad_request("query parameter 'q' is required"));
    }
    let page = q.page()?;

    Ok(Json(aggregate::search(&state.tmdb, query, page).await?))
}

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    media_type: Option<String>,
}

impl TypeQuery {
    fn media_type(&self) -> AppResult<MediaType> {
        match self.media_type.as_deref().map(str::trim) {
            None | Some("") => Ok(MediaType::Movie),
            Some(raw) => raw.parse::<MediaType>().map_err(AppError::BadRequest),
        }
    }
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TypeQuery>,
) -> AppResult<Json<Vec<ContentItem>>> {
    let media_type = q.media_type()?;
    Ok(Json(aggregate::trending(&state.tmdb, media_type).await?))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDetail>> {
    Ok(Json(aggregate::movie_detail(&state.tmdb, &state.omdb, id).await?))
}

pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<WatchlistEntry>>> {
    Ok(Json(state.watchlist.list().await?))
}

pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(mut entry): Json<NewWatchlistEntry>,
) -> AppResult<Json<WatchlistEntry>> {
    entry.title = entry.title.trim().to_string();
    if entry.title.is_empty() {
        return Err(AppError::bad_request("title is required"));
    }
    Ok(Json(state.watchlist.add(entry).await?))
}

pub async fn clear_watchlist(State(state): State<Arc<AppState>>) -> AppResult<StatusCode> {
    let removed = state.watchlist.clear().await?;
    tracing::info!(removed, "cleared watchlist");
    Ok(StatusCode::OK)
}

pub async fn set_watched(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(update): Json<WatchedUpdate>,
) -> AppResult<StatusCode> {
    if !state.watchlist.set_watched(id, update.watched).await? {
        return Err(AppError::NotFound(format!("watchlist entry {id} not found")));
    }
    Ok(StatusCode::OK)
}

pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.watchlist.remove(id).await?;
    Ok(StatusCode::OK)
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TypeQuery>,
) -> AppResult<Json<Vec<ContentItem>>> {
    let fallback = q.media_type()?;
    Ok(Json(aggregate::recommendations(&state.tmdb, &state.watchlist, fallback).await?))
}

#[derive(Debug, Deserialize)]
pub struct TrailerQuery {
    title: Option<String>,
    year: Option<String>,
}

pub async fn trailer(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrailerQuery>,
) -> AppResult<Response> {
    let title = q.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(AppError::bad_request("title is required"));
    }

    let found = state.youtube.find_trailer(title, q.year.as_deref()).await?;
    Ok(match found {
        Some(video_id) => Json(TrailerResponse { video_id }).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn trending_trailers(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<TrendingTrailer>>> {
    let trailers = aggregate::trending_trailers(
        &state.tmdb,
        &state.youtube,
        state.config.trending_trailer_count,
        state.config.trailer_concurrency,
    )
    .await?;
    Ok(Json(trailers))
}
