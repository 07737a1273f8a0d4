use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
    prelude::*,
};

use crate::{
    EngineError, ResultEngine, User,
    password::{hash_password, verify_decoy, verify_password},
    users,
};

use super::{Engine, normalize_required_text, require_non_empty, with_tx};

const BAD_CREDENTIALS: &str = "user not found or incorrect password";
const USER_NOT_FOUND: &str = "user not found";

impl Engine {
    /// Register a new user and return its id.
    ///
    /// The username is trimmed and must be unique; the password is stored
    /// hashed.
    pub async fn register_user(&self, username: &str, password: &str) -> ResultEngine<i32> {
        let username = normalize_required_text(username, "username")?;
        require_non_empty(password, "password")?;
        let hash = hash_password(password)?;

        with_tx!(self, |db_tx| {
            Self::ensure_username_free(&db_tx, &username, None).await?;

            let active = users::ActiveModel {
                username: ActiveValue::Set(username.clone()),
                password: ActiveValue::Set(hash),
                ..Default::default()
            };
            let model = active
                .insert(&db_tx)
                .await
                .map_err(|err| username_conflict(err, &username))?;

            tracing::debug!(user_id = model.id, "user registered");
            Ok(model.id)
        })
    }

    /// Check a username/password pair.
    ///
    /// An unknown username and a wrong password fail the same way, and both
    /// pay for one argon2 verification.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.database)
            .await?;

        let verified = match &model {
            Some(model) => verify_password(password, &model.password),
            None => {
                verify_decoy(password);
                false
            }
        };

        match model {
            Some(model) if verified => Ok(model.into()),
            _ => Err(EngineError::KeyNotFound(BAD_CREDENTIALS.to_string())),
        }
    }

    /// Return a user by id.
    pub async fn user(&self, user_id: i32) -> ResultEngine<User> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound(USER_NOT_FOUND.to_string()))
    }

    /// Return every user, oldest first. Password hashes are not included.
    pub async fn users(&self) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    /// Replace both username and password of an existing user.
    pub async fn update_user(
        &self,
        user_id: i32,
        username: &str,
        password: &str,
    ) -> ResultEngine<()> {
        let username = normalize_required_text(username, "username")?;
        require_non_empty(password, "password")?;
        let hash = hash_password(password)?;

        with_tx!(self, |db_tx| {
            users::Entity::find_by_id(user_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(USER_NOT_FOUND.to_string()))?;
            Self::ensure_username_free(&db_tx, &username, Some(user_id)).await?;

            let active = users::ActiveModel {
                id: ActiveValue::Unchanged(user_id),
                username: ActiveValue::Set(username.clone()),
                password: ActiveValue::Set(hash),
            };
            active
                .update(&db_tx)
                .await
                .map_err(|err| username_conflict(err, &username))?;

            tracing::debug!(user_id, "user updated");
            Ok(())
        })
    }

    /// Delete a user.
    ///
    /// Expenses referencing the user are left in place.
    pub async fn delete_user(&self, user_id: i32) -> ResultEngine<()> {
        let result = users::Entity::delete_by_id(user_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(USER_NOT_FOUND.to_string()));
        }

        tracing::debug!(user_id, "user deleted");
        Ok(())
    }

    async fn ensure_username_free(
        db_tx: &DatabaseTransaction,
        username: &str,
        except: Option<i32>,
    ) -> ResultEngine<()> {
        let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
        if let Some(user_id) = except {
            query = query.filter(users::Column::Id.ne(user_id));
        }
        if query.one(db_tx).await?.is_some() {
            return Err(EngineError::ExistingKey(username.to_string()));
        }
        Ok(())
    }
}

/// A unique index violation on insert/update means another writer took the
/// username between the check and the write.
fn username_conflict(err: DbErr, username: &str) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            EngineError::ExistingKey(username.to_string())
        }
        _ => EngineError::Database(err),
    }
}
