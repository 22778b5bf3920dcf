use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Goal, GoalInput, ResultEngine, goals};

use super::{Engine, with_tx};

fn build(id: Uuid, user_id: Uuid, input: GoalInput) -> Goal {
    Goal {
        id,
        user_id,
        name: input.name,
        target_minor: input.target_minor,
        current_minor: input.current_minor,
        deadline: input.deadline,
        description: input.description,
    }
}

impl Engine {
    pub async fn create_goal(&self, user_id: Uuid, input: GoalInput) -> ResultEngine<Goal> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let goal = build(Uuid::new_v4(), user_id, input);
            goals::ActiveModel::from(&goal).insert(&db_tx).await?;
            Ok(goal)
        })
    }

    pub async fn goals(&self, user_id: Uuid) -> ResultEngine<Vec<Goal>> {
        goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(goals::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    pub async fn goal(&self, user_id: Uuid, goal_id: Uuid) -> ResultEngine<Goal> {
        let model = self.require_goal(&self.database, user_id, goal_id).await?;
        Goal::try_from(model)
    }

    pub async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        input: GoalInput,
    ) -> ResultEngine<Goal> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_goal(&db_tx, user_id, goal_id).await?;
            let goal = build(goal_id, user_id, input);
            goals::ActiveModel::from(&goal).update(&db_tx).await?;
            Ok(goal)
        })
    }

    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_goal(&db_tx, user_id, goal_id).await?;
            goals::Entity::delete_by_id(goal_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
