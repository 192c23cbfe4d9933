//! User business logic - Back-office accounts.
//!
//! Passwords are hashed before they reach the database and are never read back in clear.

use crate::{
    core::{dao, password},
    entities::{User, user},
    errors::{DaoErrorKind, Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set, Unchanged};
use tracing::{debug, info};

fn validate_login(login: &str) -> Result<()> {
    if login.trim().is_empty() {
        return Err(Error::validation("Login cannot be empty"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::validation("Password cannot be empty"));
    }
    Ok(())
}

/// Creates a user, hashing the password.
pub async fn insert<C: ConnectionTrait>(db: &C, login: &str, password: &str) -> Result<user::Model> {
    validate_login(login)?;
    validate_password(password)?;
    let model = user::ActiveModel {
        login: Set(login.trim().to_string()),
        password_hash: Set(password::hash(password)?),
        ..Default::default()
    };
    let stored = dao::insert_model(db, model).await?;
    info!("Created user {} ({})", stored.login, stored.id);
    Ok(stored)
}

/// Renames the user with `updated.id`. The stored hash is left as is.
pub async fn update<C: ConnectionTrait>(db: &C, updated: &user::Model) -> Result<bool> {
    validate_login(&updated.login)?;
    let model = user::ActiveModel {
        id: Unchanged(updated.id),
        login: Set(updated.login.trim().to_string()),
        password_hash: NotSet,
    };
    dao::update_model(db, model).await
}

/// Replaces the password of user `id`.
pub async fn change_password<C: ConnectionTrait>(
    db: &C,
    id: i32,
    new_password: &str,
) -> Result<bool> {
    validate_password(new_password)?;
    let model = user::ActiveModel {
        id: Unchanged(id),
        login: NotSet,
        password_hash: Set(password::hash(new_password)?),
    };
    dao::update_model(db, model).await
}

/// User with this login, if any.
pub async fn find_by_login<C: ConnectionTrait>(
    db: &C,
    login: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Login.eq(login.trim()))
        .one(db)
        .await
        .map_err(|e| Error::dao(DaoErrorKind::Query, &dao::table_of::<User>(), e))
}

/// The user when login and password match, `None` otherwise.
pub async fn verify_credentials<C: ConnectionTrait>(
    db: &C,
    login: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let Some(found) = find_by_login(db, login).await? else {
        debug!("Unknown login {}", login);
        return Ok(None);
    };
    if password::verify(password, &found.password_hash)? {
        Ok(Some(found))
    } else {
        debug!("Wrong password for {}", login);
        Ok(None)
    }
}
