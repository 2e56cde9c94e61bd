use crate::{
    api::Api,
    error::Error,
    security::{credentials, session_tokens, session_tokens::TokenVerificationError},
    users::User,
};
use tracing::warn;

/// pwdvault security controller: credential verification and session token
/// issuance/validation.
pub struct SecurityApiExt<'a> {
    api: &'a Api,
}

impl<'a> SecurityApiExt<'a> {
    /// Instantiates security API extension.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Verifies the provided credentials and issues a session token. Unknown
    /// usernames and wrong passwords are deliberately indistinguishable to
    /// the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), Error> {
        let Some(user) = self.api.users().get_by_username(username).await? else {
            warn!(user.name = username, "Login attempt for unknown user.");
            return Err(Error::authentication("Invalid credentials."));
        };

        if !credentials::verify_password(password, &user.password_hash) {
            warn!(user.id = %user.id, "Login attempt with invalid password.");
            return Err(Error::authentication("Invalid credentials."));
        }

        let token = session_tokens::issue(
            &self.api.config.security.jwt_secret,
            user.id,
            &user.username,
            self.api.config.security.token_ttl,
        )?;

        Ok((user, token))
    }

    /// Verifies a session token and resolves it to the user it was issued
    /// for. A token whose user no longer exists is rejected.
    pub async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = session_tokens::verify(&self.api.config.security.jwt_secret, token).map_err(
            |err| match err {
                TokenVerificationError::Expired => Error::authentication("Token expired."),
                TokenVerificationError::Invalid | TokenVerificationError::Malformed => {
                    Error::authentication("Invalid token.")
                }
            },
        )?;

        let Some(user) = self.api.db.get_user(claims.sub).await? else {
            warn!(user.id = %claims.sub, "Token refers to a user that doesn't exist.");
            return Err(Error::authentication("Invalid token."));
        };

        Ok(user)
    }
}

impl Api {
    /// Returns an API to work with security related tasks.
    pub fn security(&self) -> SecurityApiExt<'_> {
        SecurityApiExt::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ErrorKind,
        security::session_tokens,
        tests::{MOCK_JWT_SECRET, mock_api, mock_api_with_config, mock_config},
    };
    use sqlx::SqlitePool;
    use time::Duration;

    #[sqlx::test]
    async fn can_login_and_authenticate(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        let user = api.users().signup("alice", "S3cr3t!", None).await?;

        let (logged_in_user, token) = api.security().login("alice", "S3cr3t!").await?;
        assert_eq!(logged_in_user, user);

        let authenticated_user = api.security().authenticate(&token).await?;
        assert_eq!(authenticated_user, user);

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_invalid_credentials(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        api.users().signup("alice", "S3cr3t!", None).await?;

        let err = api.security().login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Invalid credentials.");

        // Unknown user looks exactly like a wrong password.
        let err = api.security().login("mallory", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Invalid credentials.");

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_expired_token_with_distinct_message(pool: SqlitePool) -> anyhow::Result<()> {
        let mut config = mock_config();
        config.security.token_ttl = Duration::minutes(-5);
        let api = mock_api_with_config(pool, config).await?;
        api.users().signup("alice", "S3cr3t!", None).await?;

        let (_, token) = api.security().login("alice", "S3cr3t!").await?;
        let err = api.security().authenticate(&token).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Token expired.");

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_tampered_and_malformed_tokens(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;
        api.users().signup("alice", "S3cr3t!", None).await?;

        let (_, token) = api.security().login("alice", "S3cr3t!").await?;
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let err = api.security().authenticate(&tampered).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid token.");

        let err = api.security().authenticate("garbage").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid token.");

        Ok(())
    }

    #[sqlx::test]
    async fn rejects_token_for_missing_user(pool: SqlitePool) -> anyhow::Result<()> {
        let api = mock_api(pool).await?;

        // Valid signature, but the user was never provisioned.
        let token = session_tokens::issue(
            MOCK_JWT_SECRET,
            crate::users::UserId::new(),
            "ghost",
            Duration::hours(1),
        )?;
        let err = api.security().authenticate(&token).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Invalid token.");

        Ok(())
    }
}
