//! The module contains the `Debt` record and its table.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// A loan or credit line.
///
/// Only `minimum_payment_minor` takes part in the debt-load check of the
/// budget rules; the principal is reported as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Outstanding principal.
    pub amount_minor: i64,
    /// Annual rate, in percent.
    pub interest_rate: f64,
    pub minimum_payment_minor: i64,
    pub due_date: NaiveDate,
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount_minor: i64,
    pub interest_rate: f64,
    pub minimum_payment_minor: i64,
    pub due_date: Date,
    pub kind: String,
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

impl From<&Debt> for ActiveModel {
    fn from(value: &Debt) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            amount_minor: ActiveValue::Set(value.amount_minor),
            interest_rate: ActiveValue::Set(value.interest_rate),
            minimum_payment_minor: ActiveValue::Set(value.minimum_payment_minor),
            due_date: ActiveValue::Set(value.due_date),
            kind: ActiveValue::Set(value.kind.clone()),
        }
    }
}

impl TryFrom<Model> for Debt {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "debt")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            name: model.name,
            amount_minor: model.amount_minor,
            interest_rate: model.interest_rate,
            minimum_payment_minor: model.minimum_payment_minor,
            due_date: model.due_date,
            kind: model.kind,
        })
    }
}
