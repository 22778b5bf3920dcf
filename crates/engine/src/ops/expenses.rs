use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Expense, ExpenseInput, ResultEngine, expenses};

use super::{Engine, with_tx};

fn build(id: Uuid, user_id: Uuid, input: ExpenseInput) -> Expense {
    Expense {
        id,
        user_id,
        amount_minor: input.amount_minor,
        category: input.category,
        description: input.description,
        date: input.date,
        is_recurring: input.is_recurring,
        recurring_period: input.recurring_period,
    }
}

impl Engine {
    pub async fn create_expense(&self, user_id: Uuid, input: ExpenseInput) -> ResultEngine<Expense> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let expense = build(Uuid::new_v4(), user_id, input);
            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            Ok(expense)
        })
    }

    /// All expenses of a user, oldest first.
    pub async fn expenses(&self, user_id: Uuid) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(expenses::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    pub async fn expense(&self, user_id: Uuid, expense_id: Uuid) -> ResultEngine<Expense> {
        let model = self
            .require_expense(&self.database, user_id, expense_id)
            .await?;
        Expense::try_from(model)
    }

    pub async fn update_expense(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        input: ExpenseInput,
    ) -> ResultEngine<Expense> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_expense(&db_tx, user_id, expense_id).await?;
            let expense = build(expense_id, user_id, input);
            expenses::ActiveModel::from(&expense).update(&db_tx).await?;
            Ok(expense)
        })
    }

    pub async fn delete_expense(&self, user_id: Uuid, expense_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_expense(&db_tx, user_id, expense_id).await?;
            expenses::Entity::delete_by_id(expense_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
