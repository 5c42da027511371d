//! Domain operations over the tracker database.
//!
//! Each public method of [`Tracker`] is one unit of work: it checks out a pooled
//! connection, runs inside a single transaction and commits or rolls back as a whole.
//! Writes take SQLite's write lock up front (`BEGIN IMMEDIATE`).

mod exercises;
pub mod ownership;
mod records;
pub mod requests;
mod sets;
mod users;
pub mod views;
mod workouts;

use diesel::SqliteConnection;
use serde::Serialize;

use crate::auth::{DEFAULT_HASH_COST, TokenSigner};
use crate::db::models::User;
use crate::db::{self, DbError, DbPool, operations};
use crate::error::{Result, TrackerError};

pub use ownership::OwnedEntity;
pub use views::{PersonalRecordView, WorkoutExerciseView, WorkoutView};

/// Returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct Tracker {
    pool: DbPool,
    tokens: TokenSigner,
    password_cost: u32,
}

impl Tracker {
    pub fn new(pool: DbPool, tokens: TokenSigner) -> Self {
        Tracker {
            pool,
            tokens,
            password_cost: DEFAULT_HASH_COST,
        }
    }

    /// bcrypt cost for passwords hashed from now on.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Connect to `database_url` and bring the schema up to date.
    pub fn open(database_url: &str, pool_size: u32, tokens: TokenSigner) -> Result<Self, DbError> {
        let pool = db::connect(database_url, pool_size)?;
        let mut conn = pool.get()?;
        db::run_migrations(&mut conn)?;
        Ok(Tracker::new(pool, tokens))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Resolve a bearer token to the caller's user id.
    pub fn authenticate(&self, token: &str) -> Result<i32> {
        Ok(self.tokens.verify(token)?)
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        let mut pooled = self.pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.immediate_transaction(f)
    }

    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        use diesel::Connection;
        let mut pooled = self.pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.transaction(f)
    }
}

pub(crate) fn require_user(conn: &mut SqliteConnection, user_id: i32) -> Result<User> {
    operations::get_user(conn, user_id)?.ok_or_else(|| TrackerError::not_found("User"))
}
