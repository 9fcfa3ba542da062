//! User repository for database operations.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::User;

const USER_COLUMNS: &str =
    "id, name, last_name, dni, date, email, nick_name, password, status";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a user.
    ///
    /// Inserts a new row when `user.id` is unset, otherwise overwrites every
    /// column of the row with that id (creating it if it does not exist).
    /// Returns the stored record, including the assigned id.
    #[instrument(skip(self, user), fields(id = ?user.id, nick_name = %user.nick_name))]
    pub async fn save(&self, user: User) -> Result<User> {
        let id = match user.id {
            None => self.insert(&user).await?,
            Some(id) => {
                self.upsert(id, &user).await?;
                id
            }
        };

        self.find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User {} missing after save", id))
    }

    async fn insert(&self, user: &User) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO user (name, last_name, dni, date, email, nick_name, password, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.dni)
        .bind(user.date)
        .bind(&user.email)
        .bind(&user.nick_name)
        .bind(&user.password)
        .bind(user.status)
        .execute(&self.pool)
        .await
        .context("Failed to insert user")?;

        let id = result.last_insert_rowid();
        debug!("Inserted user {}", id);
        Ok(id)
    }

    async fn upsert(&self, id: i64, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user (id, name, last_name, dni, date, email, nick_name, password, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                last_name = excluded.last_name,
                dni = excluded.dni,
                date = excluded.date,
                email = excluded.email,
                nick_name = excluded.nick_name,
                password = excluded.password,
                status = excluded.status
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.dni)
        .bind(user.date)
        .bind(&user.email)
        .bind(&user.nick_name)
        .bind(&user.password)
        .bind(user.status)
        .execute(&self.pool)
        .await
        .context("Failed to save user")?;

        debug!("Saved user {}", id);
        Ok(())
    }

    /// Get a user by ID. A missing row is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user")?;

        Ok(user)
    }

    /// List active users (`status = true`) in primary-key order.
    #[instrument(skip(self))]
    pub async fn find_active(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM user WHERE status = 1 ORDER BY id ASC");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list active users")?;

        Ok(users)
    }

    /// Find a user whose email or nickname equals `identifier` and whose
    /// password equals `password`. The oldest match wins.
    #[instrument(skip(self, password))]
    pub async fn find_by_identifier_and_password(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM user \
             WHERE (email = ? OR nick_name = ?) AND password = ? \
             ORDER BY id ASC LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(identifier)
            .bind(identifier)
            .bind(password)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by credentials")?;

        Ok(user)
    }

    /// Check whether any user has the given nickname.
    #[instrument(skip(self))]
    pub async fn exists_by_nick_name(&self, nick_name: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user WHERE nick_name = ?")
            .bind(nick_name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check nickname")?;

        Ok(count.0 > 0)
    }
}
