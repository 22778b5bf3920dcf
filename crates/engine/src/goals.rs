use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// A savings target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Goal {
    /// Progress towards the target, in percent (may exceed 100).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.target_minor <= 0 {
            return 0.0;
        }
        self.current_minor as f64 / self.target_minor as f64 * 100.0
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub deadline: Option<Date>,
    pub description: Option<String>,
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

impl From<&Goal> for ActiveModel {
    fn from(value: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            target_minor: ActiveValue::Set(value.target_minor),
            current_minor: ActiveValue::Set(value.current_minor),
            deadline: ActiveValue::Set(value.deadline),
            description: ActiveValue::Set(value.description.clone()),
        }
    }
}

impl TryFrom<Model> for Goal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "goal")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            name: model.name,
            target_minor: model.target_minor,
            current_minor: model.current_minor,
            deadline: model.deadline,
            description: model.description,
        })
    }
}
