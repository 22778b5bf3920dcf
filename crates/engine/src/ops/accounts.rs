use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Account, AccountInput, ResultEngine, accounts};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_account(&self, user_id: Uuid, input: AccountInput) -> ResultEngine<Account> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let account = Account {
                id: Uuid::new_v4(),
                user_id,
                name: input.name,
                kind: input.kind,
                balance_minor: input.balance_minor,
                currency: input.currency,
            };
            accounts::ActiveModel::from(&account).insert(&db_tx).await?;
            Ok(account)
        })
    }

    /// All accounts of a user, by name.
    pub async fn accounts(&self, user_id: Uuid) -> ResultEngine<Vec<Account>> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(accounts::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    pub async fn account(&self, user_id: Uuid, account_id: Uuid) -> ResultEngine<Account> {
        let model = self
            .require_account(&self.database, user_id, account_id)
            .await?;
        Account::try_from(model)
    }

    pub async fn update_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        input: AccountInput,
    ) -> ResultEngine<Account> {
        let input = input.normalized()?;
        with_tx!(self, |db_tx| {
            self.require_account(&db_tx, user_id, account_id).await?;
            let account = Account {
                id: account_id,
                user_id,
                name: input.name,
                kind: input.kind,
                balance_minor: input.balance_minor,
                currency: input.currency,
            };
            accounts::ActiveModel::from(&account).update(&db_tx).await?;
            Ok(account)
        })
    }

    pub async fn delete_account(&self, user_id: Uuid, account_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_account(&db_tx, user_id, account_id).await?;
            accounts::Entity::delete_by_id(account_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
