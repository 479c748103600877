use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, LoaderTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::LikeExpr,
};
use tracing::{debug, info};

use super::{MovieBundle, Store};
use crate::{
    entities::{external_review, generated_opinion, genre, movie, movie_genre},
    error::{AppError, AppResult},
    models::{MovieCreate, non_blank},
};

impl Store {
    pub async fn find_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie with id {id} not found")))
    }

    pub async fn movie_bundle(&self, id: i32) -> AppResult<MovieBundle> {
        let movie = self.find_movie(id).await?;
        self.load_bundle(movie).await
    }

    /// Picks a movie uniformly at random; `None` when the catalog is empty.
    pub async fn random_movie(&self) -> AppResult<Option<MovieBundle>> {
        let total = movie::Entity::find().count(&self.db).await?;
        if total == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..total);
        debug!(total, offset, "picking random movie");

        let movie = movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .offset(offset)
            .one(&self.db)
            .await?;

        match movie {
            Some(movie) => Ok(Some(self.load_bundle(movie).await?)),
            None => Ok(None),
        }
    }

    async fn load_bundle(&self, movie: movie::Model) -> AppResult<MovieBundle> {
        let genres = movie
            .find_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(&self.db)
            .await?;
        let reviews = movie.find_related(external_review::Entity).all(&self.db).await?;
        let opinions = movie.find_related(generated_opinion::Entity).all(&self.db).await?;

        Ok(MovieBundle { movie, genres, reviews, opinions })
    }

    /// Case-insensitive substring match over title and original title.
    /// `%` and `_` in the query match themselves.
    pub async fn search_movies(
        &self,
        query: &str,
        limit: u64,
    ) -> AppResult<Vec<(movie::Model, Vec<genre::Model>)>> {
        let pattern = contains_pattern(&movie::fold_title(query));

        let movies = movie::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        movie::Column::TitleSearch
                            .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                    )
                    .add(
                        movie::Column::OriginalTitleSearch
                            .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
                    ),
            )
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        let genres = movies.load_many_to_many(genre::Entity, movie_genre::Entity, &self.db).await?;

        debug!(query, results = movies.len(), "movie search");
        Ok(movies.into_iter().zip(genres).collect())
    }

    /// Inserts a movie and links its genres, creating unknown genre names.
    ///
    /// Fails with `Conflict` when the title already exists as a title or an
    /// original title.
    pub async fn create_movie(
        &self,
        req: &MovieCreate,
    ) -> AppResult<(movie::Model, Vec<genre::Model>)> {
        let title = req.title.trim().to_string();
        let release_date = req
            .release_date
            .as_deref()
            .map(|d| d.trim().parse::<jiff::civil::Date>())
            .transpose()
            .map_err(|e| AppError::Validation(format!("release_date: {e}")))?
            .map(|d| d.to_string());

        let txn = self.db.begin().await?;

        let existing = movie::Entity::find()
            .filter(
                Condition::any()
                    .add(movie::Column::Title.eq(title.as_str()))
                    .add(movie::Column::OriginalTitle.eq(title.as_str())),
            )
            .one(&txn)
            .await?;
        if let Some(existing) = existing {
            return Err(AppError::Conflict(format!(
                "Movie '{title}' already exists with id {}",
                existing.id
            )));
        }

        let movie = movie::ActiveModel {
            title: Set(title),
            original_title: Set(non_blank(req.original_title.clone())),
            overview: Set(non_blank(req.overview.clone())),
            release_date: Set(release_date),
            runtime: Set(req.runtime),
            poster_url: Set(non_blank(req.poster_url.clone())),
            backdrop_url: Set(non_blank(req.backdrop_url.clone())),
            vote_average: Set(req.vote_average),
            vote_count: Set(req.vote_count),
            popularity: Set(req.popularity),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut genres = Vec::new();
        for name in unique_names(&req.genres) {
            let genre = match genre::Entity::find()
                .filter(genre::Column::Name.eq(name.as_str()))
                .one(&txn)
                .await?
            {
                Some(genre) => genre,
                None => {
                    debug!(name = %name, "creating genre");
                    genre::ActiveModel { name: Set(name), ..Default::default() }
                        .insert(&txn)
                        .await?
                },
            };

            movie_genre::Entity::insert(movie_genre::ActiveModel {
                movie_id: Set(movie.id),
                genre_id: Set(genre.id),
            })
            .exec_without_returning(&txn)
            .await?;

            genres.push(genre);
        }

        txn.commit().await?;

        genres.sort_by(|a, b| a.name.cmp(&b.name));
        info!(movie_id = movie.id, title = %movie.title, genres = genres.len(), "movie created");
        Ok((movie, genres))
    }

    /// Hard delete; reviews, opinions, genre links and votes go with it.
    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Movie with id {id} not found")));
        }
        info!(movie_id = id, "movie deleted");
        Ok(())
    }
}

const LIKE_ESCAPE: char = '\\';

/// Wraps `needle` in `%..%` with LIKE metacharacters escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn unique_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}
