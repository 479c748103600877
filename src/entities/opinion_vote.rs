//! Votes cast on either kind of opinion.
//!
//! A row references exactly one of `generated_opinion_id` and
//! `user_opinion_id`. The `ck_opinion_votes_one_opinion` check constraint holds
//! this in storage and [`ActiveModelBehavior::before_save`] holds it for every
//! active-model write, so the rule fails as a validation error before the
//! database has to reject it.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Name of the storage rule that keeps vote targets exclusive.
pub const ONE_OPINION_RULE: &str = "ck_opinion_votes_one_opinion";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    #[sea_orm(string_value = "up")]
    Up,
    #[sea_orm(string_value = "down")]
    Down,
    #[sea_orm(string_value = "lol")]
    Lol,
    #[sea_orm(string_value = "wtf")]
    Wtf,
}

impl VoteType {
    pub fn label(self) -> &'static str {
        match self {
            VoteType::Up => "UP",
            VoteType::Down => "DOWN",
            VoteType::Lol => "LOL",
            VoteType::Wtf => "WTF",
        }
    }
}

/// The opinion a vote is attached to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteTarget {
    Generated(i32),
    User(i32),
}

#[derive(Debug, thiserror::Error)]
#[error("a vote must reference exactly one opinion (ck_opinion_votes_one_opinion)")]
pub struct InvalidVoteTarget;

impl VoteTarget {
    pub fn from_columns(
        generated_opinion_id: Option<i32>,
        user_opinion_id: Option<i32>,
    ) -> Result<Self, InvalidVoteTarget> {
        match (generated_opinion_id, user_opinion_id) {
            (Some(id), None) => Ok(VoteTarget::Generated(id)),
            (None, Some(id)) => Ok(VoteTarget::User(id)),
            _ => Err(InvalidVoteTarget),
        }
    }

    /// Column values as `(generated_opinion_id, user_opinion_id)`.
    pub fn columns(self) -> (Option<i32>, Option<i32>) {
        match self {
            VoteTarget::Generated(id) => (Some(id), None),
            VoteTarget::User(id) => (None, Some(id)),
        }
    }

    pub fn opinion_id(self) -> i32 {
        match self {
            VoteTarget::Generated(id) | VoteTarget::User(id) => id,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            VoteTarget::Generated(_) => "generated",
            VoteTarget::User(_) => "user",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "opinion_votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub generated_opinion_id: Option<i32>,
    pub user_opinion_id: Option<i32>,
    pub vote_type: VoteType,
    pub voter_identifier: Option<String>,
    pub created_at: i64,
}

impl Model {
    pub fn target(&self) -> Result<VoteTarget, InvalidVoteTarget> {
        VoteTarget::from_columns(self.generated_opinion_id, self.user_opinion_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::generated_opinion::Entity",
        from = "Column::GeneratedOpinionId",
        to = "super::generated_opinion::Column::Id",
        on_delete = "Cascade"
    )]
    GeneratedOpinion,
    #[sea_orm(
        belongs_to = "super::user_opinion::Entity",
        from = "Column::UserOpinionId",
        to = "super::user_opinion::Column::Id",
        on_delete = "Cascade"
    )]
    UserOpinion,
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

impl ActiveModel {
    pub fn for_target(
        target: VoteTarget,
        vote_type: VoteType,
        voter_identifier: Option<String>,
    ) -> Self {
        let (generated_opinion_id, user_opinion_id) = target.columns();
        Self {
            id: ActiveValue::NotSet,
            generated_opinion_id: ActiveValue::Set(generated_opinion_id),
            user_opinion_id: ActiveValue::Set(user_opinion_id),
            vote_type: ActiveValue::Set(vote_type),
            voter_identifier: ActiveValue::Set(voter_identifier),
            created_at: ActiveValue::Set(super::now_sec()),
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        VoteTarget::from_columns(
            current(&self.generated_opinion_id),
            current(&self.user_opinion_id),
        )
        .map_err(|err| DbErr::Custom(err.to_string()))?;
        Ok(self)
    }
}

fn current(value: &ActiveValue<Option<i32>>) -> Option<i32> {
    match value {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
        ActiveValue::NotSet => None,
    }
}
