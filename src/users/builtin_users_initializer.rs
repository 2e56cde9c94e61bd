use crate::{api::Api, users::BuiltinUser};
use tracing::info;

/// Parses and upserts the `|`-separated list of builtin users. Safe to run
/// on every startup: existing users keep their ID and get their password
/// hash refreshed.
pub async fn builtin_users_initializer<BU: AsRef<str>>(
    api: &Api,
    builtin_users: BU,
) -> anyhow::Result<()> {
    info!("Initializing builtin users.");
    let users = api.users();

    let mut initialized_builtin_users = 0;
    for builtin_user_str in builtin_users.as_ref().split('|') {
        users
            .upsert_builtin(BuiltinUser::try_from(builtin_user_str)?)
            .await?;
        initialized_builtin_users += 1;
    }

    info!("Successfully initialized {initialized_builtin_users} builtin users.");

    Ok(())
}
