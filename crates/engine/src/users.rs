//! Registered users.
//!
//! The engine only stores the password hash; hashing and verification live
//! with the auth layer of the server.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Trimmed and lower-cased; unique across users.
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(value: &User) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            email: ActiveValue::Set(value.email.clone()),
            hashed_password: ActiveValue::Set(value.hashed_password.clone()),
            is_active: ActiveValue::Set(value.is_active),
            first_name: ActiveValue::Set(value.first_name.clone()),
            last_name: ActiveValue::Set(value.last_name.clone()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "user")?,
            email: model.email,
            hashed_password: model.hashed_password,
            is_active: model.is_active,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
        })
    }
}
