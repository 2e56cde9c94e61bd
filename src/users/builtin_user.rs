use anyhow::bail;

/// A user provisioned at startup from the application configuration. The
/// serialized form is `username:password` or `username:password:email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl TryFrom<&str> for BuiltinUser {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let user_properties = value.split(':').collect::<Vec<_>>();
        let (username, password, email) = match user_properties[..] {
            [username, password] => (username, password, None),
            [username, password, email] => (username, password, Some(email.to_string())),
            _ => bail!(
                "Builtin user is malformed, expected `username:password` or `username:password:email`."
            ),
        };

        if username.is_empty() || password.is_empty() {
            bail!("Builtin user username and password cannot be empty.");
        }

        Ok(BuiltinUser {
            username: username.to_string(),
            password: password.to_string(),
            email,
        })
    }
}
