use anyhow::Context;
use sqlx::{Pool, Sqlite, sqlite::SqlitePool};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Sqlite>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Opens database "connection" and runs the embedded migrations. The
    /// migrations are safe to apply on every startup.
    pub async fn open(url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("Failed to connect to the database at `{url}`."))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }

    /// Wraps an existing pool (used by tests where `sqlx::test` manages the
    /// database lifecycle and migrations).
    #[cfg(test)]
    pub fn create(pool: Pool<Sqlite>) -> Self {
        Database { pool }
    }
}

impl AsRef<Database> for Database {
    fn as_ref(&self) -> &Self {
        self
    }
}
