use sea_orm::{ActiveModelTrait, ConnectionTrait, DbBackend, FromQueryResult, Set, Statement};
use tracing::{debug, info};

use super::Store;
use crate::{
    entities::{
        external_review::{self, ReviewSource},
        generated_opinion, now_sec, user_opinion,
    },
    error::AppResult,
    models::{OpinionCreate, ReviewCreate, TopOpinion, non_blank},
};

const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Generated opinions with per-type vote counts, most absurd first and then
/// by net balance (`up - down`). The left join keeps unvoted opinions.
const TOP_OPINIONS_SQL: &str = "\
SELECT
    o.id AS id,
    o.movie_id AS movie_id,
    m.title AS movie_title,
    o.content AS content,
    o.absurdity_score AS absurdity_score,
    o.generation_method AS generation_method,
    COUNT(v.id) AS vote_count,
    COALESCE(SUM(CASE WHEN v.vote_type = 'up' THEN 1 ELSE 0 END), 0) AS up_votes,
    COALESCE(SUM(CASE WHEN v.vote_type = 'down' THEN 1 ELSE 0 END), 0) AS down_votes,
    COALESCE(SUM(CASE WHEN v.vote_type = 'lol' THEN 1 ELSE 0 END), 0) AS lol_votes,
    COALESCE(SUM(CASE WHEN v.vote_type = 'wtf' THEN 1 ELSE 0 END), 0) AS wtf_votes
FROM generated_opinions o
JOIN movies m ON m.id = o.movie_id
LEFT JOIN opinion_votes v ON v.generated_opinion_id = o.id
GROUP BY o.id, o.movie_id, m.title, o.content, o.absurdity_score, o.generation_method
ORDER BY
    o.absurdity_score DESC,
    COALESCE(SUM(CASE WHEN v.vote_type = 'up' THEN 1 ELSE 0 END), 0)
        - COALESCE(SUM(CASE WHEN v.vote_type = 'down' THEN 1 ELSE 0 END), 0) DESC,
    o.id ASC
LIMIT ";

impl Store {
    pub async fn add_user_opinion(
        &self,
        movie_id: i32,
        req: &OpinionCreate,
    ) -> AppResult<(user_opinion::Model, String)> {
        let movie = self.find_movie(movie_id).await?;

        let opinion = user_opinion::ActiveModel {
            movie_id: Set(movie.id),
            author_name: Set(non_blank(req.author_name.clone())),
            content: Set(req.content.clone()),
            created_at: Set(now_sec()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(movie_id, opinion_id = opinion.id, "user opinion added");
        Ok((opinion, movie.title))
    }

    pub async fn add_generated_opinion(
        &self,
        movie_id: i32,
        content: &str,
        absurdity_score: f64,
        generation_method: Option<String>,
    ) -> AppResult<(generated_opinion::Model, String)> {
        let movie = self.find_movie(movie_id).await?;

        let opinion = generated_opinion::ActiveModel {
            movie_id: Set(movie.id),
            content: Set(content.to_string()),
            absurdity_score: Set(absurdity_score),
            generation_method: Set(generation_method),
            created_at: Set(now_sec()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            movie_id,
            opinion_id = opinion.id,
            absurdity_score,
            method = ?opinion.generation_method,
            "generated opinion added"
        );
        Ok((opinion, movie.title))
    }

    /// Stores a visitor review, tagged `user` to keep it apart from catalog
    /// reviews.
    pub async fn add_user_review(
        &self,
        movie_id: i32,
        req: &ReviewCreate,
    ) -> AppResult<(external_review::Model, String)> {
        let movie = self.find_movie(movie_id).await?;

        let author =
            non_blank(req.author.clone()).unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

        let review = external_review::ActiveModel {
            movie_id: Set(movie.id),
            source: Set(ReviewSource::User),
            author: Set(Some(author)),
            content: Set(req.content.clone()),
            rating: Set(non_blank(req.rating.clone())),
            url: Set(None),
            published_at: Set(None),
            created_at: Set(now_sec()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(movie_id, review_id = review.id, "user review added");
        Ok((review, movie.title))
    }

    pub async fn top_opinions(&self, limit: u64) -> AppResult<Vec<TopOpinion>> {
        let backend = self.db.get_database_backend();
        let placeholder = match backend {
            DbBackend::Postgres => "$1",
            _ => "?",
        };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let stmt = Statement::from_sql_and_values(
            backend,
            format!("{TOP_OPINIONS_SQL}{placeholder}"),
            [limit.into()],
        );
        let rows = TopOpinion::find_by_statement(stmt).all(&self.db).await?;

        debug!(
            limit,
            rows = rows.len(),
            leader_net = ?rows.first().map(TopOpinion::net_votes),
            "top opinions"
        );
        Ok(rows)
    }
}
