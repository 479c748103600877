//! Database-backed operations behind the HTTP handlers.

mod movies;
mod opinions;
mod votes;

use sea_orm::DatabaseConnection;

use crate::{
    entities::{external_review, generated_opinion, genre, movie},
    error::AppResult,
};

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

/// A movie together with everything the detail views sample from.
#[derive(Clone, Debug)]
pub struct MovieBundle {
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub reviews: Vec<external_review::Model>,
    pub opinions: Vec<generated_opinion::Model>,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> AppResult<()> {
        crate::db::ping(&self.db).await
    }
}
