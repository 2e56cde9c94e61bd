mod raw_user;

use self::raw_user::RawUser;
use crate::{
    database::Database,
    error::Error,
    users::{User, UserId},
};
#[cfg(test)]
use sqlx::error::ErrorKind as SqlxErrorKind;

/// Extends the primary database with the user management-related methods.
impl Database {
    /// Retrieves a user from the `users` table using user ID.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, Error> {
        let raw_user: Option<RawUser> = sqlx::query_as(
            r#"
SELECT id, username, password_hash, email, created_at
FROM users
WHERE id = ?1
            "#,
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw_user.map(User::try_from).transpose()?)
    }

    /// Retrieves a user from the `users` table using the unique username.
    pub async fn get_user_by_username<T: AsRef<str>>(
        &self,
        username: T,
    ) -> Result<Option<User>, Error> {
        let raw_user: Option<RawUser> = sqlx::query_as(
            r#"
SELECT id, username, password_hash, email, created_at
FROM users
WHERE username = ?1
            "#,
        )
        .bind(username.as_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw_user.map(User::try_from).transpose()?)
    }

    /// Inserts a user into the `users` table, fails if the username is taken.
    /// Only reachable from the test-only signup fixture: production users are
    /// provisioned through [`Database::upsert_user`].
    #[cfg(test)]
    pub async fn insert_user<U: AsRef<User>>(&self, user: U) -> Result<(), Error> {
        let raw_user = RawUser::from(user.as_ref());

        let result = sqlx::query(
            r#"
INSERT INTO users (id, username, password_hash, email, created_at)
VALUES ( ?1, ?2, ?3, ?4, ?5 )
            "#,
        )
        .bind(raw_user.id)
        .bind(&raw_user.username)
        .bind(&raw_user.password_hash)
        .bind(&raw_user.email)
        .bind(raw_user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.kind() == SqlxErrorKind::UniqueViolation => {
                Err(Error::validation(format!(
                    "User '{}' is already registered.",
                    raw_user.username
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Inserts or updates a user in the `users` table, keyed by the unique
    /// username. Used for builtin-user provisioning at startup.
    pub async fn upsert_user<U: AsRef<User>>(&self, user: U) -> Result<(), Error> {
        let raw_user = RawUser::from(user.as_ref());

        sqlx::query(
            r#"
INSERT INTO users (id, username, password_hash, email, created_at)
VALUES ( ?1, ?2, ?3, ?4, ?5 )
ON CONFLICT(username) DO UPDATE SET password_hash = excluded.password_hash,
                                    email = excluded.email
            "#,
        )
        .bind(raw_user.id)
        .bind(&raw_user.username)
        .bind(&raw_user.password_hash)
        .bind(&raw_user.email)
        .bind(raw_user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
