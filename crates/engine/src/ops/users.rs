use chrono::Utc;
use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, NewUser, ProfileUpdate, ResultEngine, User, users};

use super::{Engine, with_tx};

impl Engine {
    /// Register a new user.
    ///
    /// Fails with `ExistingKey` when the (normalized) email is already taken.
    pub async fn create_user(&self, cmd: NewUser) -> ResultEngine<User> {
        let cmd = cmd.normalized()?;
        with_tx!(self, |db_tx| {
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(cmd.email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(cmd.email));
            }

            let user = User {
                id: Uuid::new_v4(),
                email: cmd.email,
                hashed_password: cmd.hashed_password,
                is_active: true,
                first_name: cmd.first_name,
                last_name: cmd.last_name,
                created_at: Utc::now(),
            };
            users::ActiveModel::from(&user).insert(&db_tx).await?;
            Ok(user)
        })
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id).await?;
        User::try_from(model)
    }

    /// Look a user up by email, ignoring case and surrounding spaces.
    pub async fn user_by_email(&self, email: &str) -> ResultEngine<User> {
        let email = email.trim().to_lowercase();
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
        User::try_from(model)
    }

    /// Replace the editable profile fields of a user.
    pub async fn update_profile(&self, user_id: Uuid, cmd: ProfileUpdate) -> ResultEngine<User> {
        let cmd = cmd.normalized()?;
        with_tx!(self, |db_tx| {
            let mut user = User::try_from(self.require_user(&db_tx, user_id).await?)?;

            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(cmd.email.clone()))
                .filter(users::Column::Id.ne(user_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(cmd.email));
            }

            user.email = cmd.email;
            user.first_name = cmd.first_name;
            user.last_name = cmd.last_name;
            users::ActiveModel::from(&user).update(&db_tx).await?;
            Ok(user)
        })
    }
}
