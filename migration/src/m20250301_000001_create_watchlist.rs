use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Watchlist::Table)
                    .if_not_exists()
                    .col(pk_auto(Watchlist::Id))
                    .col(big_integer(Watchlist::MovieId))
                    .col(string(Watchlist::Title))
                    .col(boolean(Watchlist::Watched).default(false))
                    .col(big_integer(Watchlist::AddedAt))
                    .col(string_null(Watchlist::PosterPath))
                    .col(string(Watchlist::MediaType).default("movie"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_added_at")
                    .table(Watchlist::Table)
                    .col(Watchlist::AddedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserPreferences::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPreferences::Id))
                    .col(string_uniq(UserPreferences::PreferenceKey))
                    .col(string(UserPreferences::PreferenceValue))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserPreferences::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Watchlist::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Watchlist {
    Table,
    Id,
    MovieId,
    Title,
    Watched,
    AddedAt,
    PosterPath,
    MediaType,
}

#[derive(DeriveIden)]
enum UserPreferences {
    Table,
    Id,
    PreferenceKey,
    PreferenceValue,
}
