use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Where a review came from. Catalog imports carry the outlet; visitor
/// submissions are always `User`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    #[sea_orm(string_value = "tmdb")]
    Tmdb,
    #[sea_orm(string_value = "nyt")]
    Nyt,
    #[sea_orm(string_value = "guardian")]
    Guardian,
    #[sea_orm(string_value = "omdb")]
    Omdb,
    #[sea_orm(string_value = "other")]
    Other,
    #[sea_orm(string_value = "user")]
    User,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "external_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_id: i32,
    pub source: ReviewSource,
    pub author: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub rating: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
