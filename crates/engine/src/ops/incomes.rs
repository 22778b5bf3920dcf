use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Income, IncomeInput, ResultEngine, incomes};

use super::{Engine, with_tx};

fn build(id: Uuid, user_id: Uuid, input: IncomeInput) -> Income {
    Income {
        id,
        user_id,
        amount_minor: input.amount_minor,
        source: input.source,
        description: input.description,
        date: input.date,
        is_recurring: input.is_recurring,
        recurring_period: input.recurring_period,
    }
}

impl Engine {
    pub async fn create_income(&self, user_id: Uuid, input: IncomeInput) -> ResultEngine<Income> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let income = build(Uuid::new_v4(), user_id, input);
            incomes::ActiveModel::from(&income).insert(&db_tx).await?;
            Ok(income)
        })
    }

    /// All incomes of a user, oldest first.
    pub async fn incomes(&self, user_id: Uuid) -> ResultEngine<Vec<Income>> {
        incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(incomes::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Income::try_from)
            .collect()
    }

    pub async fn income(&self, user_id: Uuid, income_id: Uuid) -> ResultEngine<Income> {
        let model = self
            .require_income(&self.database, user_id, income_id)
            .await?;
        Income::try_from(model)
    }

    pub async fn update_income(
        &self,
        user_id: Uuid,
        income_id: Uuid,
        input: IncomeInput,
    ) -> ResultEngine<Income> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_income(&db_tx, user_id, income_id).await?;
            let income = build(income_id, user_id, input);
            incomes::ActiveModel::from(&income).update(&db_tx).await?;
            Ok(income)
        })
    }

    pub async fn delete_income(&self, user_id: Uuid, income_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_income(&db_tx, user_id, income_id).await?;
            incomes::Entity::delete_by_id(income_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
