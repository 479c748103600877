use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251029_000001_create_catalog::Movies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalReviews::Table)
                    .if_not_exists()
                    .col(pk_auto(ExternalReviews::Id))
                    .col(integer(ExternalReviews::MovieId))
                    .col(string_len(ExternalReviews::Source, 20))
                    .col(string_len_null(ExternalReviews::Author, 255))
                    .col(text(ExternalReviews::Content))
                    .col(string_len_null(ExternalReviews::Rating, 50))
                    .col(string_len_null(ExternalReviews::Url, 500))
                    .col(big_integer_null(ExternalReviews::PublishedAt))
                    .col(big_integer(ExternalReviews::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_external_reviews_movie")
                            .from(ExternalReviews::Table, ExternalReviews::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_external_reviews_movie_id")
                    .table(ExternalReviews::Table)
                    .col(ExternalReviews::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_external_reviews_source")
                    .table(ExternalReviews::Table)
                    .col(ExternalReviews::Source)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeneratedOpinions::Table)
                    .if_not_exists()
                    .col(pk_auto(GeneratedOpinions::Id))
                    .col(integer(GeneratedOpinions::MovieId))
                    .col(text(GeneratedOpinions::Content))
                    .col(double(GeneratedOpinions::AbsurdityScore).default(0.0))
                    .col(string_len_null(GeneratedOpinions::GenerationMethod, 100))
                    .col(big_integer(GeneratedOpinions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_generated_opinions_movie")
                            .from(GeneratedOpinions::Table, GeneratedOpinions::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_opinions_movie_id")
                    .table(GeneratedOpinions::Table)
                    .col(GeneratedOpinions::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_opinions_created_at")
                    .table(GeneratedOpinions::Table)
                    .col(GeneratedOpinions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserOpinions::Table)
                    .if_not_exists()
                    .col(pk_auto(UserOpinions::Id))
                    .col(integer(UserOpinions::MovieId))
                    .col(string_len_null(UserOpinions::AuthorName, 255))
                    .col(text(UserOpinions::Content))
                    .col(big_integer(UserOpinions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_opinions_movie")
                            .from(UserOpinions::Table, UserOpinions::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_opinions_movie_id")
                    .table(UserOpinions::Table)
                    .col(UserOpinions::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_opinions_created_at")
                    .table(UserOpinions::Table)
                    .col(UserOpinions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserOpinions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(GeneratedOpinions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ExternalReviews::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ExternalReviews {
    Table,
    Id,
    MovieId,
    Source,
    Author,
    Content,
    Rating,
    Url,
    PublishedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GeneratedOpinions {
    Table,
    Id,
    MovieId,
    Content,
    AbsurdityScore,
    GenerationMethod,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserOpinions {
    Table,
    Id,
    MovieId,
    AuthorName,
    Content,
    CreatedAt,
}
