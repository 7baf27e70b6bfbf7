//! Diesel row types for the `user_accounts` table.
//!
//! These stay internal to the persistence adapter; conversion to domain
//! types happens in the repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::user_accounts;

/// Row read from `user_accounts`. Audit timestamps are not selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAccountRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

/// Insertable account; timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_accounts)]
pub(crate) struct NewUserAccountRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Changes applied when an existing account is overwritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_accounts)]
pub(crate) struct UserAccountUpdate<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}
