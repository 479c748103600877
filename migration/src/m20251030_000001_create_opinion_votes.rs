use sea_orm_migration::{
    prelude::*,
    sea_orm::{ConnectionTrait, DbBackend},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Raw DDL so the check constraint carries its name into driver errors.
        let id_column = match manager.get_database_backend() {
            DbBackend::Postgres => "id SERIAL PRIMARY KEY",
            _ => "id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT",
        };
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE TABLE IF NOT EXISTS opinion_votes (
                    {id_column},
                    generated_opinion_id INTEGER NULL,
                    user_opinion_id INTEGER NULL,
                    vote_type VARCHAR(20) NOT NULL,
                    voter_identifier VARCHAR(255) NULL,
                    created_at BIGINT NOT NULL,
                    CONSTRAINT ck_opinion_votes_one_opinion CHECK (
                        (generated_opinion_id IS NOT NULL AND user_opinion_id IS NULL)
                        OR (generated_opinion_id IS NULL AND user_opinion_id IS NOT NULL)
                    ),
                    CONSTRAINT fk_opinion_votes_generated_opinion
                        FOREIGN KEY (generated_opinion_id)
                        REFERENCES generated_opinions (id) ON DELETE CASCADE,
                    CONSTRAINT fk_opinion_votes_user_opinion
                        FOREIGN KEY (user_opinion_id)
                        REFERENCES user_opinions (id) ON DELETE CASCADE
                )"
            ))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opinion_votes_generated_opinion_id")
                    .table(OpinionVotes::Table)
                    .col(OpinionVotes::GeneratedOpinionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opinion_votes_user_opinion_id")
                    .table(OpinionVotes::Table)
                    .col(OpinionVotes::UserOpinionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OpinionVotes::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum OpinionVotes {
    Table,
    GeneratedOpinionId,
    UserOpinionId,
}
