use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Debt, DebtInput, ResultEngine, debts};

use super::{Engine, with_tx};

fn build(id: Uuid, user_id: Uuid, input: DebtInput) -> Debt {
    Debt {
        id,
        user_id,
        name: input.name,
        amount_minor: input.amount_minor,
        interest_rate: input.interest_rate,
        minimum_payment_minor: input.minimum_payment_minor,
        due_date: input.due_date,
        kind: input.kind,
    }
}

impl Engine {
    pub async fn create_debt(&self, user_id: Uuid, input: DebtInput) -> ResultEngine<Debt> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let debt = build(Uuid::new_v4(), user_id, input);
            debts::ActiveModel::from(&debt).insert(&db_tx).await?;
            Ok(debt)
        })
    }

    /// All debts of a user, nearest due date first.
    pub async fn debts(&self, user_id: Uuid) -> ResultEngine<Vec<Debt>> {
        debts::Entity::find()
            .filter(debts::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(debts::Column::DueDate)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Debt::try_from)
            .collect()
    }

    pub async fn debt(&self, user_id: Uuid, debt_id: Uuid) -> ResultEngine<Debt> {
        let model = self.require_debt(&self.database, user_id, debt_id).await?;
        Debt::try_from(model)
    }

    pub async fn update_debt(
        &self,
        user_id: Uuid,
        debt_id: Uuid,
        input: DebtInput,
    ) -> ResultEngine<Debt> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_debt(&db_tx, user_id, debt_id).await?;
            let debt = build(debt_id, user_id, input);
            debts::ActiveModel::from(&debt).update(&db_tx).await?;
            Ok(debt)
        })
    }

    pub async fn delete_debt(&self, user_id: Uuid, debt_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_debt(&db_tx, user_id, debt_id).await?;
            debts::Entity::delete_by_id(debt_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
