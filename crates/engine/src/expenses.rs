use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, RecurringPeriod,
    recurrence::period_from_column,
    util::parse_uuid,
};

/// Money spent on a given day, tagged with a free category label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Always > 0.
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub date: Date,
    pub is_recurring: bool,
    pub recurring_period: Option<String>,
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

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.to_string()),
            amount_minor: ActiveValue::Set(value.amount_minor),
            category: ActiveValue::Set(value.category.clone()),
            description: ActiveValue::Set(value.description.clone()),
            date: ActiveValue::Set(value.date),
            is_recurring: ActiveValue::Set(value.is_recurring),
            recurring_period: ActiveValue::Set(
                value.recurring_period.map(|p| p.as_str().to_string()),
            ),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            amount_minor: model.amount_minor,
            recurring_period: period_from_column(model.recurring_period.as_deref())?,
            category: model.category,
            description: model.description,
            date: model.date,
            is_recurring: model.is_recurring,
        })
    }
}
