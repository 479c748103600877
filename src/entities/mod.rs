pub mod external_review;
pub mod generated_opinion;
pub mod genre;
pub mod movie;
pub mod movie_genre;
pub mod opinion_vote;
pub mod user_opinion;

pub(crate) fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
