#![deny(warnings)]

mod api;
mod config;
mod database;
mod error;
mod security;
mod server;
mod users;
mod vault;

use crate::config::{Config, RawConfig};
use anyhow::anyhow;
use clap::{Arg, Command, crate_authors, crate_description, crate_version, value_parser};
use std::env;
use tracing::info;

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("pwdvault API server")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("PWDVAULT_CONFIG")
                .short('c')
                .long("config")
                .default_value("pwdvault.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("PORT")
                .env("PWDVAULT_PORT")
                .short('p')
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Defines a TCP port to listen on."),
        )
        .arg(
            Arg::new("BUILTIN_USERS")
                .env("PWDVAULT_BUILTIN_USERS")
                .short('u')
                .long("builtin-users")
                .help("List of builtin users in the 'username:password[:email]' format, separated with `|`."),
        )
        .get_matches();

    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!("pwdvault raw configuration: {raw_config:?}.");

    // CLI argument takes precedence.
    let http_port = matches
        .get_one::<u16>("PORT")
        .copied()
        .unwrap_or(raw_config.port);
    let builtin_users = matches.get_one::<String>("BUILTIN_USERS").cloned();

    server::run(Config::try_from(raw_config)?, http_port, builtin_users)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::Api,
        config::{Config, DatabaseConfig, SecurityConfig},
        database::Database,
        security::credentials,
        users::{User, UserId},
        vault::VaultEncryption,
    };
    use sqlx::SqlitePool;
    use time::{Duration, OffsetDateTime};
    use uuid::{Uuid, uuid};

    pub const MOCK_JWT_SECRET: &str = "8d53055c55a1e1e2b5c4f05a67be5333";
    pub const MOCK_ENCRYPTION_KEY: &str =
        "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2";

    pub fn mock_config() -> Config {
        Config {
            db: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: MOCK_JWT_SECRET.to_string(),
                vault_encryption_key: MOCK_ENCRYPTION_KEY.to_string(),
                token_ttl: Duration::hours(24),
            },
        }
    }

    pub async fn mock_api(pool: SqlitePool) -> anyhow::Result<Api> {
        mock_api_with_config(pool, mock_config()).await
    }

    pub async fn mock_api_with_config(pool: SqlitePool, config: Config) -> anyhow::Result<Api> {
        let encryption = VaultEncryption::new(&config.security.vault_encryption_key)?;
        Ok(Api::new(config, Database::create(pool), encryption))
    }

    pub fn mock_user() -> anyhow::Result<User> {
        mock_user_with_id(uuid!("00000000-0000-0000-0000-000000000001"), "alice")
    }

    pub fn mock_user_with_id(id: Uuid, username: &str) -> anyhow::Result<User> {
        Ok(User {
            id: UserId::from(id),
            username: username.to_string(),
            password_hash: credentials::hash_password("S3cr3t!")?,
            email: None,
            created_at: OffsetDateTime::from_unix_timestamp(1262340000)?,
        })
    }
}
