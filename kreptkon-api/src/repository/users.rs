//! Postgres-backed storage for user records.
//!
//! Uniqueness of `username` and `email` is enforced by the table constraints;
//! a unique violation on insert is how duplicate creates are detected. Every
//! write runs through [`UserRepository::in_transaction`] so a failed write is
//! rolled back before the error is surfaced.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{Error, Result};
use crate::models::user::{NewUser, User};

/// Unit of work against the store: committed atomically or fully rolled back
type Tx = Transaction<'static, Postgres>;

/// Repository owning the durable representation of users
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for readiness probes
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `users` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                username VARCHAR(80) UNIQUE NOT NULL,
                email VARCHAR(120) UNIQUE NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All users in primary-key order
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Look up a single user, failing with [`Error::NotFound`] when absent
    pub async fn get(&self, id: i32) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {id} not found")))
    }

    /// Insert a new user and return the stored record, including the
    /// store-assigned `id` and `created_at`.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        self.in_transaction(move |tx| {
            Box::pin(async move {
                let user = sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email) VALUES ($1, $2) \
                     RETURNING id, username, email, created_at",
                )
                .bind(&new_user.username)
                .bind(&new_user.email)
                .fetch_one(&mut **tx)
                .await?;
                Ok(user)
            })
        })
        .await
    }

    /// Remove a user, failing with [`Error::NotFound`] when absent
    pub async fn delete(&self, id: i32) -> Result<()> {
        self.in_transaction(move |tx| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(Error::NotFound(format!("user {id} not found")));
                }
                Ok(())
            })
        })
        .await
    }

    /// Run `op` inside a transaction: committed on success, rolled back on
    /// any error before that error is surfaced.
    async fn in_transaction<T, F>(&self, op: F) -> Result<T>
    where
        F: for<'t> FnOnce(&'t mut Tx) -> BoxFuture<'t, Result<T>>,
    {
        let mut tx = self.pool.begin().await?;
        match op(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("transaction rollback failed: {rollback_err}");
                }
                Err(err)
            }
        }
    }
}
