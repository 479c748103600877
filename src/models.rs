use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::{
    external_review::{self, ReviewSource},
    generated_opinion, genre, movie,
    opinion_vote::{VoteTarget, VoteType},
    user_opinion,
};

pub const MAX_GENRES: usize = 20;

#[derive(Debug, Deserialize, Validate)]
pub struct MovieCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 255))]
    pub original_title: Option<String>,
    pub overview: Option<String>,
    #[validate(custom(function = "validate_release_date"))]
    pub release_date: Option<String>,
    #[validate(range(min = 1))]
    pub runtime: Option<i32>,
    #[validate(length(max = 500))]
    pub poster_url: Option<String>,
    #[validate(length(max = 500))]
    pub backdrop_url: Option<String>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub vote_average: Option<f64>,
    #[validate(range(min = 0))]
    pub vote_count: Option<i32>,
    #[validate(range(min = 0.0))]
    pub popularity: Option<f64>,
    #[serde(default)]
    #[validate(custom(function = "validate_genre_names"))]
    pub genres: Vec<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must not be blank"));
    }
    Ok(())
}

fn validate_release_date(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<jiff::civil::Date>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("release_date must be YYYY-MM-DD"))
}

fn validate_genre_names(names: &[String]) -> Result<(), ValidationError> {
    if names.len() > MAX_GENRES {
        return Err(ValidationError::new("too many genres"));
    }
    if names.iter().map(|n| n.trim().chars().count()).any(|len| len == 0 || len > 100) {
        return Err(ValidationError::new("genre names must be 1-100 characters"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct OpinionCreate {
    #[validate(length(max = 255))]
    pub author_name: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AbsurdOpinionCreate {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate(range(min = 0.0, max = 10.0))]
    pub absurdity_score: f64,
    #[validate(length(max = 100))]
    pub generation_method: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub content: String,
    #[validate(length(max = 50))]
    pub rating: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VoteCreate {
    pub vote_type: VoteType,
    #[validate(length(max = 255))]
    pub voter_identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreResponse {
    fn from(g: genre::Model) -> Self {
        Self { id: g.id, name: g.name }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub popularity: Option<f64>,
    pub genres: Vec<GenreResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl MovieResponse {
    pub fn new(movie: movie::Model, genres: Vec<genre::Model>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            original_title: movie.original_title,
            overview: movie.overview,
            release_date: movie.release_date,
            runtime: movie.runtime,
            poster_url: movie.poster_url,
            backdrop_url: movie.backdrop_url,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            popularity: movie.popularity,
            genres: genres.into_iter().map(Into::into).collect(),
            created_at: format_timestamp(movie.created_at),
            updated_at: format_timestamp(movie.updated_at),
        }
    }
}

/// `GET /movie/random` payload: a movie with one real review and one fake
/// opinion.
#[derive(Clone, Debug, Serialize)]
pub struct RandomMovieResponse {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    pub real_review: Option<String>,
    pub fake_opinion: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub real_review: Option<String>,
    pub fake_opinion: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct OpinionResponse {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl OpinionResponse {
    pub fn new(opinion: user_opinion::Model, movie_title: String) -> Self {
        Self {
            id: opinion.id,
            movie_id: opinion.movie_id,
            movie_title,
            author_name: opinion.author_name,
            content: opinion.content,
            created_at: format_timestamp(opinion.created_at),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedOpinionResponse {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub content: String,
    pub absurdity_score: f64,
    pub generation_method: Option<String>,
    pub created_at: String,
}

impl GeneratedOpinionResponse {
    pub fn new(opinion: generated_opinion::Model, movie_title: String) -> Self {
        Self {
            id: opinion.id,
            movie_id: opinion.movie_id,
            movie_title,
            content: opinion.content,
            absurdity_score: opinion.absurdity_score,
            generation_method: opinion.generation_method,
            created_at: format_timestamp(opinion.created_at),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub source: ReviewSource,
    pub author: Option<String>,
    pub content: String,
    pub rating: Option<String>,
    pub created_at: String,
}

impl ReviewResponse {
    pub fn new(review: external_review::Model, movie_title: String) -> Self {
        Self {
            id: review.id,
            movie_id: review.movie_id,
            movie_title,
            source: review.source,
            author: review.author,
            content: review.content,
            rating: review.rating,
            created_at: format_timestamp(review.created_at),
        }
    }
}

/// One row of the ranked opinions view.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct TopOpinion {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub content: String,
    pub absurdity_score: f64,
    pub generation_method: Option<String>,
    pub vote_count: i64,
    pub up_votes: i64,
    pub down_votes: i64,
    pub lol_votes: i64,
    pub wtf_votes: i64,
}

impl TopOpinion {
    pub fn net_votes(&self) -> i64 {
        self.up_votes - self.down_votes
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct VoteResponse {
    pub id: i32,
    pub opinion_id: i32,
    pub opinion_kind: &'static str,
    pub vote_type: VoteType,
    pub voter_identifier: Option<String>,
    pub message: String,
}

impl VoteResponse {
    pub fn new(
        id: i32,
        target: VoteTarget,
        vote_type: VoteType,
        voter_identifier: Option<String>,
    ) -> Self {
        Self {
            id,
            opinion_id: target.opinion_id(),
            opinion_kind: target.kind(),
            vote_type,
            voter_identifier,
            message: format!("Your {} vote has been registered!", vote_type.label()),
        }
    }
}

/// Renders stored Unix seconds as an RFC 3339 UTC string.
pub fn format_timestamp(secs: i64) -> String {
    jiff::Timestamp::from_second(secs).map(|t| t.to_string()).unwrap_or_else(|_| secs.to_string())
}

/// Trims optional free text and drops it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    })
}
