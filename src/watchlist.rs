use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use crate::{
    entities::watchlist,
    error::AppResult,
    models::{MediaType, NewWatchlistEntry, WatchlistEntry},
};

/// Persistent watchlist. Every operation is a single statement; the storage
/// engine serializes concurrent writers.
#[derive(Clone)]
pub struct WatchlistStore {
    db: DatabaseConnection,
}

impl WatchlistStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All entries, newest first.
    pub async fn list(&self) -> AppResult<Vec<WatchlistEntry>> {
        let rows = watchlist::Entity::find()
            .order_by_desc(watchlist::Column::AddedAt)
            .order_by_desc(watchlist::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter().map(to_entry).collect()
    }

    /// Inserts a snapshot of the title. Duplicate `movie_id`s are allowed.
    pub async fn add(&self, entry: NewWatchlistEntry) -> AppResult<WatchlistEntry> {
        let model = watchlist::ActiveModel {
            id: NotSet,
            movie_id: Set(entry.movie_id),
            title: Set(entry.title),
            watched: Set(false),
            added_at: Set(jiff::Timestamp::now().as_millisecond()),
            poster_path: Set(entry.poster_path),
            media_type: Set(entry.media_type.as_str().to_string()),
        };

        let model = model.insert(&self.db).await?;
        tracing::debug!(id = model.id, movie_id = model.movie_id, "added watchlist entry");
        to_entry(model)
    }

    /// Returns whether a row matched.
    pub async fn set_watched(&self, id: i32, watched: bool) -> AppResult<bool> {
        let res = watchlist::Entity::update_many()
            .col_expr(watchlist::Column::Watched, Expr::value(watched))
            .filter(watchlist::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Returns whether a row was deleted; deleting a missing id is not an error.
    pub async fn remove(&self, id: i32) -> AppResult<bool> {
        let res = watchlist::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn clear(&self) -> AppResult<u64> {
        let res = watchlist::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    /// The earliest-added entry, which seeds recommendations.
    pub async fn first(&self) -> AppResult<Option<WatchlistEntry>> {
        watchlist::Entity::find()
            .order_by_asc(watchlist::Column::Id)
            .one(&self.db)
            .await?
            .map(to_entry)
            .transpose()
    }
}

fn to_entry(row: watchlist::Model) -> AppResult<WatchlistEntry> {
    Ok(WatchlistEntry {
        id: row.id,
        movie_id: row.movie_id,
        title: row.title,
        watched: row.watched,
        added_at: jiff::Timestamp::from_millisecond(row.added_at)?,
        poster_path: row.poster_path.unwrap_or_default(),
        media_type: MediaType::from_declared(&row.media_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn new_entry(movie_id: i64, title: &str) -> NewWatchlistEntry {
        NewWatchlistEntry {
            movie_id,
            title: title.to_string(),
            poster_path: Some(format!("/{movie_id}.jpg")),
            media_type: MediaType::Movie,
        }
    }

    async fn store() -> WatchlistStore {
        WatchlistStore::new(db::memory().await)
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.first().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_then_list_puts_new_entry_first() {
        let store = store().await;
        let a = store.add(new_entry(10, "Alien")).await.unwrap();
        let b = store.add(new_entry(20, "Aliens")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(!b.watched);
        assert_eq!(b.poster_path, "/20.jpg");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], b);
        assert_eq!(listed[1].id, a.id);
    }

    #[tokio::test]
    async fn duplicate_content_ids_are_kept() {
        let store = store().await;
        store.add(new_entry(10, "Alien")).await.unwrap();
        store.add(new_entry(10, "Alien")).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn set_watched_touches_only_its_row() {
        let store = store().await;
        let a = store.add(new_entry(10, "Alien")).await.unwrap();
        let b = store.add(new_entry(20, "Aliens")).await.unwrap();

        assert!(store.set_watched(a.id, true).await.unwrap());

        let listed = store.list().await.unwrap();
        let a2 = listed.iter().find(|e| e.id == a.id).unwrap();
        let b2 = listed.iter().find(|e| e.id == b.id).unwrap();
        assert!(a2.watched);
        assert_eq!(a2.added_at, a.added_at);
        assert_eq!(b2, &b);
    }

    #[tokio::test]
    async fn set_watched_reports_missing_row() {
        let store = store().await;
        assert!(!store.set_watched(999, true).await.unwrap());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = store().await;
        let a = store.add(new_entry(10, "Alien")).await.unwrap();
        let b = store.add(new_entry(20, "Aliens")).await.unwrap();

        assert!(store.remove(a.id).await.unwrap());
        assert!(!store.remove(a.id).await.unwrap());

        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, [b.id]);
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = store().await;
        store.add(new_entry(10, "Alien")).await.unwrap();
        store.add(new_entry(20, "Aliens")).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_is_the_oldest_entry() {
        let store = store().await;
        let a = store.add(new_entry(10, "Alien")).await.unwrap();
        store.add(new_entry(20, "Aliens")).await.unwrap();
        assert_eq!(store.first().await.unwrap().unwrap().id, a.id);
    }

    #[tokio::test]
    async fn media_type_round_trips() {
        let store = store().await;
        let entry =
            NewWatchlistEntry { media_type: MediaType::Tv, ..new_entry(1396, "Breaking Bad") };
        store.add(entry).await.unwrap();
        assert_eq!(store.list().await.unwrap()[0].media_type, MediaType::Tv);
    }
}
