//! User account access service.
//!
//! Coordinates the primary store, the cache, password hashing and ownership
//! checks for every account operation. Reads are cache-aside; writes go to
//! the primary store first and refresh the cache afterwards, so a crash in
//! between leaves the cache missing an entry rather than holding a stale one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    NewUserRequest, PasswordHasher, SessionInvalidator, UpdateUserRequest, UserAccounts,
    UserCache, UserCacheKey, UserRepository,
};
use crate::domain::{
    AccessError, CallerIdentity, NewUserRecord, PlainPassword, ResultEnvelope, UserId,
    UserRecord, Username,
};

const LIST_ALL: &str = "list_all";
const GET_BY_ID: &str = "get_by_id";
const ADD_USER: &str = "add_user";
const UPDATE_BY_ID: &str = "update_by_id";
const DELETE_BY_ID: &str = "delete_by_id";

/// Early exit from an operation: either an answer for the caller or a fault.
enum Interrupt {
    Reject(ResultEnvelope),
    Fail(AccessError),
}

impl From<AccessError> for Interrupt {
    fn from(value: AccessError) -> Self {
        Self::Fail(value)
    }
}

impl From<ResultEnvelope> for Interrupt {
    fn from(value: ResultEnvelope) -> Self {
        Self::Reject(value)
    }
}

type Step<T> = Result<T, Interrupt>;

fn settle(result: Step<ResultEnvelope>) -> Result<ResultEnvelope, AccessError> {
    match result {
        Ok(envelope) | Err(Interrupt::Reject(envelope)) => Ok(envelope),
        Err(Interrupt::Fail(err)) => {
            error!(operation = err.operation(), error = %err, "user account operation failed");
            Err(err)
        }
    }
}

fn not_found_by_id(id: &str) -> ResultEnvelope {
    ResultEnvelope::not_found(format!("Failed to find the user with ID : {id}"))
}

fn caller_not_found() -> ResultEnvelope {
    ResultEnvelope::not_found("cannot find the user")
}

fn forbidden(id: &str) -> ResultEnvelope {
    ResultEnvelope::forbidden(format!("Permission denied ! with user ID : {id}"))
}

fn username_taken(username: &Username) -> ResultEnvelope {
    ResultEnvelope::conflict(format!(
        "User is already registered with this username: {username}"
    ))
}

fn parse_id(raw: &str) -> Step<UserId> {
    UserId::new(raw).map_err(|_| {
        warn!(id = raw, "malformed user id");
        Interrupt::Reject(ResultEnvelope::bad_input(format!(
            "Invalid ObjectId string provided: {raw}"
        )))
    })
}

fn require_id(raw: &str) -> Step<()> {
    if raw.is_empty() {
        return Err(ResultEnvelope::bad_input(format!("Invalid user id : {raw}")).into());
    }
    Ok(())
}

fn ensure_owner(
    own: &UserRecord,
    id: &UserId,
    caller: &CallerIdentity,
    operation: &'static str,
) -> Step<()> {
    if own.id() != id {
        warn!(
            operation,
            caller = %caller.username(),
            id = %id,
            "caller does not own the requested record"
        );
        return Err(forbidden(id.as_ref()).into());
    }
    Ok(())
}

fn parse_credentials(username: &str, password: String) -> Step<(Username, PlainPassword)> {
    let username =
        Username::new(username).map_err(|err| ResultEnvelope::bad_input(err.to_string()))?;
    let password =
        PlainPassword::new(password).map_err(|err| ResultEnvelope::bad_input(err.to_string()))?;
    Ok((username, password))
}

/// Access coordinator implementing [`UserAccounts`].
///
/// Holds no mutable state of its own; all state lives behind the ports.
pub struct UserAccessService<R, C, H> {
    users: Arc<R>,
    cache: Arc<C>,
    hasher: Arc<H>,
}

impl<R, C, H> Clone for UserAccessService<R, C, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            cache: Arc::clone(&self.cache),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R, C, H> UserAccessService<R, C, H> {
    /// Create a new service over the given ports.
    pub fn new(users: Arc<R>, cache: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            users,
            cache,
            hasher,
        }
    }
}

impl<R, C, H> UserAccessService<R, C, H>
where
    R: UserRepository,
    C: UserCache,
    H: PasswordHasher,
{
    /// Look up the caller's own record; unknown callers see not-found.
    async fn own_record(
        &self,
        caller: &CallerIdentity,
        operation: &'static str,
    ) -> Step<UserRecord> {
        Ok(self
            .users
            .find_by_username(caller.username())
            .await
            .map_err(AccessError::store(operation))?
            .ok_or_else(caller_not_found)?)
    }

    /// Resolve the caller's own record, validate the id and confirm the
    /// caller owns it.
    ///
    /// Order matters: the caller is looked up before the id is validated so
    /// unknown callers see not-found even for malformed ids.
    async fn authorize(
        &self,
        caller: &CallerIdentity,
        raw_id: &str,
        operation: &'static str,
    ) -> Step<UserId> {
        let own = self.own_record(caller, operation).await?;
        let id = parse_id(raw_id)?;
        ensure_owner(&own, &id, caller, operation)?;
        Ok(id)
    }

    /// Refresh the cache entry for a record just written to the store.
    ///
    /// When the refresh fails the old entry is evicted so the cache is left
    /// missing the record rather than holding a stale copy.
    async fn cache_record(&self, record: &UserRecord, operation: &'static str) -> Step<()> {
        let Err(err) = self.cache.set(record.id(), record).await else {
            return Ok(());
        };
        warn!(operation, id = %record.id(), error = %err, "cache refresh failed, evicting entry");
        if let Err(evict_err) = self.cache.delete(&UserCacheKey::from(record.id())).await {
            error!(operation, id = %record.id(), error = %evict_err, "cache eviction failed");
        }
        Err(AccessError::cache(operation)(err).into())
    }

    async fn username_holder(
        &self,
        username: &Username,
        operation: &'static str,
    ) -> Step<Option<UserRecord>> {
        Ok(self
            .users
            .find_by_username(username)
            .await
            .map_err(AccessError::store(operation))?)
    }

    async fn cached(&self, raw_id: &str) -> Step<Option<UserRecord>> {
        let Ok(key) = UserCacheKey::new(raw_id) else {
            return Ok(None);
        };
        Ok(self
            .cache
            .get(&key)
            .await
            .map_err(AccessError::cache(GET_BY_ID))?)
    }

    async fn get_by_id_steps(&self, raw_id: &str, caller: &CallerIdentity) -> Step<ResultEnvelope> {
        if let Some(cached) = self.cached(raw_id).await? {
            debug!(id = raw_id, "user cache hit");
            if cached.id().as_ref() != raw_id {
                warn!(id = raw_id, cached_id = %cached.id(), "cached record identity mismatch");
                return Err(forbidden(raw_id).into());
            }
            return Ok(ResultEnvelope::ok_user(cached.view()));
        }
        debug!(id = raw_id, "user cache miss");

        let id = parse_id(raw_id)?;
        let own = self.own_record(caller, GET_BY_ID).await?;
        ensure_owner(&own, &id, caller, GET_BY_ID)?;
        let record = self
            .users
            .find_by_id(&id)
            .await
            .map_err(AccessError::store(GET_BY_ID))?
            .ok_or_else(|| not_found_by_id(raw_id))?;
        self.cache_record(&record, GET_BY_ID).await?;
        Ok(ResultEnvelope::ok_user(record.view()))
    }

    async fn add_user_steps(&self, request: NewUserRequest) -> Step<ResultEnvelope> {
        let (username, password) = parse_credentials(&request.username, request.password)?;
        if self.username_holder(&username, ADD_USER).await?.is_some() {
            return Err(username_taken(&username).into());
        }

        let hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(AccessError::hashing(ADD_USER))?;
        let record = self
            .users
            .insert(&NewUserRecord::new(username, hash))
            .await
            .map_err(AccessError::store(ADD_USER))?;
        self.cache_record(&record, ADD_USER).await?;
        info!(id = %record.id(), "user account created");
        Ok(ResultEnvelope::ok_message(format!(
            "User has been added with id {}",
            record.id()
        )))
    }

    async fn update_by_id_steps(
        &self,
        request: UpdateUserRequest,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Step<ResultEnvelope> {
        require_id(&request.id)?;
        let (username, password) = parse_credentials(&request.username, request.password)?;
        let id = self.authorize(caller, &request.id, UPDATE_BY_ID).await?;

        let target = self
            .users
            .find_by_id(&id)
            .await
            .map_err(AccessError::store(UPDATE_BY_ID))?
            .ok_or_else(|| not_found_by_id(&request.id))?;
        let holder = self.username_holder(&username, UPDATE_BY_ID).await?;
        if holder.is_some_and(|holder| holder.id() != target.id()) {
            return Err(username_taken(&username).into());
        }

        let hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(AccessError::hashing(UPDATE_BY_ID))?;
        let saved = self
            .users
            .save(&target.with_credentials(username, hash))
            .await
            .map_err(AccessError::store(UPDATE_BY_ID))?;
        self.cache_record(&saved, UPDATE_BY_ID).await?;
        session.invalidate();
        info!(id = %saved.id(), "user account updated");
        Ok(ResultEnvelope::ok_user(saved.view()))
    }

    async fn delete_by_id_steps(
        &self,
        raw_id: &str,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Step<ResultEnvelope> {
        require_id(raw_id)?;
        let id = self.authorize(caller, raw_id, DELETE_BY_ID).await?;

        self.users
            .delete_by_id(&id)
            .await
            .map_err(AccessError::store(DELETE_BY_ID))?;
        let key = UserCacheKey::from(&id);
        let cached = self
            .cache
            .keys_matching(&key)
            .await
            .map_err(AccessError::cache(DELETE_BY_ID))?;
        if !cached.is_empty() {
            self.cache
                .delete(&key)
                .await
                .map_err(AccessError::cache(DELETE_BY_ID))?;
        }
        session.invalidate();
        info!(id = raw_id, "user account deleted");
        Ok(ResultEnvelope::ok_message(format!(
            "User details have been deleted with user-id {raw_id}"
        )))
    }
}

#[async_trait(?Send)]
impl<R, C, H> UserAccounts for UserAccessService<R, C, H>
where
    R: UserRepository,
    C: UserCache,
    H: PasswordHasher,
{
    async fn list_all(&self) -> Result<ResultEnvelope, AccessError> {
        info!(operation = LIST_ALL, "listing user accounts");
        match self.users.find_all().await {
            Ok(records) => Ok(ResultEnvelope::ok_users(
                records.iter().map(UserRecord::view).collect(),
            )),
            Err(err) => {
                error!(operation = LIST_ALL, error = %err, "user store failed");
                Ok(ResultEnvelope::internal_error())
            }
        }
    }

    async fn get_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<ResultEnvelope, AccessError> {
        info!(operation = GET_BY_ID, id, caller = %caller.username(), "fetching user account");
        settle(self.get_by_id_steps(id, caller).await)
    }

    async fn add_user(&self, request: NewUserRequest) -> Result<ResultEnvelope, AccessError> {
        info!(operation = ADD_USER, username = %request.username.trim(), "creating user account");
        settle(self.add_user_steps(request).await)
    }

    async fn update_by_id(
        &self,
        request: UpdateUserRequest,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError> {
        info!(
            operation = UPDATE_BY_ID,
            id = %request.id,
            caller = %caller.username(),
            "updating user account"
        );
        settle(self.update_by_id_steps(request, caller, session).await)
    }

    async fn delete_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError> {
        info!(operation = DELETE_BY_ID, id, caller = %caller.username(), "deleting user account");
        settle(self.delete_by_id_steps(id, caller, session).await)
    }
}
