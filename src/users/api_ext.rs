use crate::{
    api::Api,
    error::Error,
    security::credentials,
    users::{BuiltinUser, User, UserId},
};
use time::OffsetDateTime;

pub struct UsersApiExt<'a> {
    api: &'a Api,
}

impl<'a> UsersApiExt<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Retrieves a user by the unique username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.api.db.get_user_by_username(username).await
    }

    /// Inserts or refreshes a builtin user provisioned from configuration.
    pub async fn upsert_builtin(&self, builtin_user: BuiltinUser) -> Result<User, Error> {
        let user = User {
            id: UserId::new(),
            username: builtin_user.username,
            password_hash: credentials::hash_password(&builtin_user.password)?,
            email: builtin_user.email,
            created_at: now_in_whole_seconds()?,
        };
        self.api.db.upsert_user(&user).await?;

        // The upsert preserves the ID of a pre-existing row, return the
        // stored representation rather than the candidate one.
        Ok(self
            .api
            .db
            .get_user_by_username(&user.username)
            .await?
            .unwrap_or(user))
    }
}

/// Registration has no public surface (users are provisioned at startup),
/// signup only exists as a fixture for tests that need a regular user.
#[cfg(test)]
impl<'a> UsersApiExt<'a> {
    /// Registers a new user with the given username and password. The
    /// password is hashed before it ever reaches storage.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User, Error> {
        if username.is_empty() {
            return Err(Error::validation("Username cannot be empty."));
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            password_hash: credentials::hash_password(password)?,
            email: email.map(ToString::to_string),
            created_at: now_in_whole_seconds()?,
        };
        self.api.db.insert_user(&user).await?;

        Ok(user)
    }
}

impl Api {
    /// Returns an API to work with users.
    pub fn users(&self) -> UsersApiExt<'_> {
        UsersApiExt::new(self)
    }
}

/// The database stores timestamps with a one second precision, make sure the
/// in-memory representation matches what a re-read would return.
fn now_in_whole_seconds() -> Result<OffsetDateTime, Error> {
    OffsetDateTime::from_unix_timestamp(OffsetDateTime::now_utc().unix_timestamp())
        .map_err(|err| anyhow::Error::from(err).into())
}

#[cfg(test)]
mod tests {
    use crate::{error::ErrorKind, security::credentials, tests::mock_api};
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn can_signup_user(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        let user = api.users().signup("alice", "S3cr3t!", None).await?;
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "S3cr3t!");
        assert!(credentials::verify_password("S3cr3t!", &user.password_hash));

        let stored_user = api.users().get_by_username("alice").await?.unwrap();
        assert_eq!(stored_user, user);

        Ok(())
    }

    #[sqlx::test]
    async fn cannot_signup_user_twice(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        api.users().signup("alice", "S3cr3t!", None).await?;
        let err = api
            .users()
            .signup("alice", "other-password", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        Ok(())
    }

    #[sqlx::test]
    async fn signup_validates_input(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        let err = api.users().signup("", "S3cr3t!", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = api.users().signup("alice", "", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(api.users().get_by_username("alice").await?.is_none());

        Ok(())
    }
}
