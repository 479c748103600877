use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tmdb_id: Option<i32>,
    pub title: String,
    pub original_title: Option<String>,
    /// Case-folded copies of the titles that search matches against.
    pub title_search: String,
    pub original_title_search: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub popularity: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::external_review::Entity")]
    ExternalReview,
    #[sea_orm(has_many = "super::generated_opinion::Entity")]
    GeneratedOpinion,
    #[sea_orm(has_many = "super::user_opinion::Entity")]
    UserOpinion,
    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,
}

impl Related<super::external_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalReview.def()
    }
}

impl Related<super::generated_opinion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedOpinion.def()
    }
}

impl Related<super::user_opinion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserOpinion.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genre::Relation::Movie.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = super::now_sec();
        if insert && matches!(self.created_at, ActiveValue::NotSet) {
            self.created_at = ActiveValue::Set(now);
        }
        self.updated_at = ActiveValue::Set(now);

        if let ActiveValue::Set(title) = &self.title {
            self.title_search = ActiveValue::Set(fold_title(title));
        }
        if let ActiveValue::Set(original_title) = &self.original_title {
            self.original_title_search =
                ActiveValue::Set(original_title.as_deref().map(fold_title));
        }
        Ok(self)
    }
}

/// Unicode lowercase; SQLite's `lower()` and `LIKE` only fold ASCII.
pub fn fold_title(title: &str) -> String {
    title.to_lowercase()
}
