//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, PasswordHash, UserId, UserRecord, Username};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserAccountRow, UserAccountRow, UserAccountUpdate};
use super::pool::DbPool;
use super::schema::user_accounts;

/// Diesel-backed primary store for user accounts.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: UserAccountRow) -> Result<UserRecord, UserPersistenceError> {
    let id = UserId::new(&row.id).map_err(|err| {
        warn!(id = %row.id, error = %err, "stored user id is malformed");
        UserPersistenceError::query("stored user id is malformed")
    })?;
    let username = Username::new(&row.username).map_err(|err| {
        warn!(id = %row.id, error = %err, "stored username is invalid");
        UserPersistenceError::query("stored username is invalid")
    })?;
    Ok(UserRecord::new(
        id,
        username,
        PasswordHash::new(row.password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(&self) -> Result<Vec<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserAccountRow> = user_accounts::table
            .order((user_accounts::created_at.asc(), user_accounts::id.asc()))
            .select(UserAccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserAccountRow> = user_accounts::table
            .filter(user_accounts::id.eq(id.as_ref()))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserAccountRow> = user_accounts::table
            .filter(user_accounts::username.eq(username.as_ref()))
            .order((user_accounts::created_at.asc(), user_accounts::id.asc()))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn insert(&self, user: &NewUserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = UserId::generate();
        let row = NewUserAccountRow {
            id: id.as_ref(),
            username: user.username.as_ref(),
            password_hash: user.password_hash.as_str(),
        };
        let stored: UserAccountRow = diesel::insert_into(user_accounts::table)
            .values(&row)
            .returning(UserAccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_record(stored)
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserAccountRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_str(),
        };
        let changes = UserAccountUpdate {
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_str(),
            updated_at: Utc::now(),
        };
        let stored: UserAccountRow = diesel::insert_into(user_accounts::table)
            .values(&row)
            .on_conflict(user_accounts::id)
            .do_update()
            .set(&changes)
            .returning(UserAccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_record(stored)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(user_accounts::table.filter(user_accounts::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
