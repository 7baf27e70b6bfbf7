//! Diesel table definitions for the accounts database.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Registered user accounts.
    user_accounts (id) {
        /// 24-character hexadecimal identifier assigned by the service.
        id -> Varchar,
        /// Login name. Not unique at the database level.
        username -> Text,
        /// bcrypt hash of the account password.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
