//! The module contains the `Account` record and its table.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, util::parse_uuid};

/// A bank, savings or cash account with its current balance.
///
/// The balance is entered by the user; it is not derived from expenses or
/// incomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: String,
    /// May be negative (overdrawn).
    pub balance_minor: i64,
    pub currency: Currency,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: String,
    pub balance_minor: i64,
    pub currency: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(value: &Account) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            kind: ActiveValue::Set(value.kind.clone()),
            balance_minor: ActiveValue::Set(value.balance_minor),
            currency: ActiveValue::Set(value.currency.code().to_string()),
        }
    }
}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "account")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            name: model.name,
            kind: model.kind,
            balance_minor: model.balance_minor,
            currency: Currency::try_from(model.currency.as_str())?,
        })
    }
}
