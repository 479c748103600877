use sea_orm::{ActiveModelTrait, EntityTrait};
use tracing::info;

use super::Store;
use crate::{
    entities::{
        generated_opinion,
        opinion_vote::{self, VoteTarget, VoteType},
        user_opinion,
    },
    error::{AppError, AppResult},
};

impl Store {
    /// Records a vote on the opinion `target` names, after checking that the
    /// opinion exists.
    pub async fn cast_vote(
        &self,
        target: VoteTarget,
        vote_type: VoteType,
        voter_identifier: Option<String>,
    ) -> AppResult<opinion_vote::Model> {
        let exists = match target {
            VoteTarget::Generated(id) => {
                generated_opinion::Entity::find_by_id(id).one(&self.db).await?.is_some()
            },
            VoteTarget::User(id) => {
                user_opinion::Entity::find_by_id(id).one(&self.db).await?.is_some()
            },
        };
        if !exists {
            return Err(AppError::NotFound(match target {
                VoteTarget::Generated(id) => format!("Generated opinion with id {id} not found"),
                VoteTarget::User(id) => format!("User opinion with id {id} not found"),
            }));
        }

        let vote = opinion_vote::ActiveModel::for_target(target, vote_type, voter_identifier)
            .insert(&self.db)
            .await?;

        info!(
            vote_id = vote.id,
            kind = target.kind(),
            opinion_id = target.opinion_id(),
            vote_type = vote_type.label(),
            "vote registered"
        );
        Ok(vote)
    }
}
