use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(integer_null(Genres::TmdbId).unique_key())
                    .col(string_len_uniq(Genres::Name, 100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(integer_null(Movies::TmdbId).unique_key())
                    .col(string_len(Movies::Title, 255))
                    .col(string_len_null(Movies::OriginalTitle, 255))
                    .col(string_len(Movies::TitleSearch, 255))
                    .col(string_len_null(Movies::OriginalTitleSearch, 255))
                    .col(text_null(Movies::Overview))
                    .col(string_len_null(Movies::ReleaseDate, 50))
                    .col(integer_null(Movies::Runtime))
                    .col(string_len_null(Movies::PosterUrl, 500))
                    .col(string_len_null(Movies::BackdropUrl, 500))
                    .col(double_null(Movies::VoteAverage))
                    .col(integer_null(Movies::VoteCount))
                    .col(double_null(Movies::Popularity))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenres::Table)
                    .if_not_exists()
                    .col(integer(MovieGenres::MovieId))
                    .col(integer(MovieGenres::GenreId))
                    .primary_key(Index::create().col(MovieGenres::MovieId).col(MovieGenres::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_movie")
                            .from(MovieGenres::Table, MovieGenres::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_genre")
                            .from(MovieGenres::Table, MovieGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Movies {
    Table,
    Id,
    TmdbId,
    Title,
    OriginalTitle,
    TitleSearch,
    OriginalTitleSearch,
    Overview,
    ReleaseDate,
    Runtime,
    PosterUrl,
    BackdropUrl,
    VoteAverage,
    VoteCount,
    Popularity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    TmdbId,
    Name,
}

#[derive(DeriveIden)]
enum MovieGenres {
    Table,
    MovieId,
    GenreId,
}
