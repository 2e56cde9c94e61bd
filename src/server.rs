mod app_state;
mod extractors;
mod handlers;

use crate::{
    api::Api, config::Config, database::Database, server::app_state::AppState,
    users::builtin_users_initializer, vault::VaultEncryption,
};
use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(handlers::status_get))
        .route("/login", web::post().to(handlers::security_login))
        .route("/vault", web::get().to(handlers::vault_entries_list))
        .route("/vault", web::post().to(handlers::vault_entries_create));
}

#[actix_web::main]
pub async fn run(
    config: Config,
    http_port: u16,
    builtin_users: Option<String>,
) -> Result<(), anyhow::Error> {
    let db = Database::open(&config.db.url).await?;

    // A bad encryption key must fail startup, not the first vault request.
    let encryption = VaultEncryption::new(&config.security.vault_encryption_key)?;
    let api = Api::new(config, db, encryption);

    if let Some(ref builtin_users) = builtin_users {
        builtin_users_initializer(&api, builtin_users)
            .await
            .with_context(|| "Cannot initialize builtin users")?;
    }

    let http_server_url = format!("0.0.0.0:{http_port}");
    let state = web::Data::new(AppState::new(api));
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compat::new(middleware::Compress::default()))
            .wrap(middleware::NormalizePath::trim())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .service(web::scope("/api").configure(api_routes))
    })
    .bind(&http_server_url)
    .with_context(|| format!("Failed to bind to {http_server_url}."))?;

    info!("The server is available at http://{http_server_url}.");

    http_server
        .run()
        .await
        .with_context(|| "Failed to run the server.")
}

#[cfg(test)]
mod tests {
    use super::{api_routes, app_state::AppState};
    use crate::tests::mock_api;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value as JsonValue, json};
    use sqlx::SqlitePool;

    // Initializes a test server with a single `alice` user. A macro since the
    // concrete service type is not nameable.
    macro_rules! mock_server {
        ($pool:expr) => {{
            let api = mock_api($pool).await?;
            api.users().signup("alice", "S3cr3t!", None).await?;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::new(api)))
                    .service(web::scope("/api").configure(api_routes)),
            )
            .await
        }};
    }

    #[sqlx::test]
    async fn status_is_healthy_without_authentication(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let response = test::call_service(
            &server,
            test::TestRequest::get().uri("/api/status").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(response).await;
        assert_eq!(body, json!({ "status": "healthy", "service": "pwdvault" }));

        Ok(())
    }

    #[sqlx::test]
    async fn login_issues_token_for_valid_credentials(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "alice", "password": "S3cr3t!" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(response).await;
        assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
        assert!(body["user_id"].as_str().is_some());

        Ok(())
    }

    #[sqlx::test]
    async fn login_rejects_invalid_credentials(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "alice", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[sqlx::test]
    async fn login_rejects_missing_credentials(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "alice", "password": "" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: JsonValue = test::read_body_json(response).await;
        assert_eq!(body["message"], "Username and password are required.");

        Ok(())
    }

    #[sqlx::test]
    async fn vault_requires_authentication(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let response = test::call_service(
            &server,
            test::TestRequest::get().uri("/api/vault").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = test::call_service(
            &server,
            test::TestRequest::get()
                .uri("/api/vault")
                .insert_header(("Authorization", "Bearer not-a-token"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[sqlx::test]
    async fn vault_entries_full_flow(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let login_response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "alice", "password": "S3cr3t!" }))
                .to_request(),
        )
        .await;
        let login_body: JsonValue = test::read_body_json(login_response).await;
        let token = login_body["token"].as_str().unwrap().to_string();

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/vault")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "title": "bank",
                    "username": "alice@bank.example",
                    "password": "p@ssw0rd",
                    "url": "https://bank.example"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: JsonValue = test::read_body_json(response).await;
        assert_eq!(created["title"], "bank");
        assert_eq!(created["password"], "p@ssw0rd");

        let response = test::call_service(
            &server,
            test::TestRequest::get()
                .uri("/api/vault")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let entries: JsonValue = test::read_body_json(response).await;
        assert_eq!(entries.as_array().map(Vec::len), Some(1));
        assert_eq!(entries[0]["id"], created["id"]);
        assert_eq!(entries[0]["password"], "p@ssw0rd");

        Ok(())
    }

    #[sqlx::test]
    async fn vault_rejects_invalid_entries(pool: SqlitePool) -> anyhow::Result<()> {
        let server = mock_server!(pool);

        let login_response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "alice", "password": "S3cr3t!" }))
                .to_request(),
        )
        .await;
        let login_body: JsonValue = test::read_body_json(login_response).await;
        let token = login_body["token"].as_str().unwrap().to_string();

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/vault")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({ "title": "", "password": "p@ssw0rd" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[sqlx::test]
    async fn vault_entries_are_not_visible_to_other_users(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let server = mock_server!(pool.clone());
        let api = mock_api(pool).await?;
        api.users().signup("bob", "hunter2!", None).await?;

        let login = |username: &str, password: &str| {
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request()
        };

        let alice_login: JsonValue =
            test::read_body_json(test::call_service(&server, login("alice", "S3cr3t!")).await)
                .await;
        let alice_token = alice_login["token"].as_str().unwrap().to_string();

        let bob_login: JsonValue =
            test::read_body_json(test::call_service(&server, login("bob", "hunter2!")).await)
                .await;
        let bob_token = bob_login["token"].as_str().unwrap().to_string();

        let response = test::call_service(
            &server,
            test::TestRequest::post()
                .uri("/api/vault")
                .insert_header(("Authorization", format!("Bearer {alice_token}")))
                .set_json(json!({ "title": "bank", "password": "p@ssw0rd" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let bob_entries: JsonValue = test::read_body_json(
            test::call_service(
                &server,
                test::TestRequest::get()
                    .uri("/api/vault")
                    .insert_header(("Authorization", format!("Bearer {bob_token}")))
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(bob_entries, json!([]));

        Ok(())
    }
}
