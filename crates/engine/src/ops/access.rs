//! Owner-scoped lookups.
//!
//! A record owned by someone else is reported exactly like a missing one.

use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, accounts, debts, expenses, goals, incomes, users};

use super::Engine;

/// Generates a `require_*` method loading one owned row or failing with
/// `KeyNotFound`.
macro_rules! impl_owned_lookup {
    ($require_fn:ident, $module:ident, $err_msg:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            user_id: Uuid,
            id: Uuid,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(id.to_string())
                .filter($module::Column::UserId.eq(user_id.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_owned_lookup!(require_account, accounts, "account not exists");
    impl_owned_lookup!(require_expense, expenses, "expense not exists");
    impl_owned_lookup!(require_income, incomes, "income not exists");
    impl_owned_lookup!(require_debt, debts, "debt not exists");
    impl_owned_lookup!(require_goal, goals, "goal not exists");

    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }
}
