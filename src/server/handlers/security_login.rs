use crate::{error::Error, server::app_state::AppState};
use actix_web::{HttpResponse, web};
use serde_derive::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

pub async fn security_login(
    state: web::Data<AppState>,
    body_params: web::Json<LoginParams>,
) -> Result<HttpResponse, Error> {
    let body_params = body_params.into_inner();
    if body_params.username.is_empty() || body_params.password.is_empty() {
        return Err(Error::validation("Username and password are required."));
    }

    let (user, token) = state
        .api
        .security()
        .login(&body_params.username, &body_params.password)
        .await?;

    info!(user.id = %user.id, "Successfully logged in user.");

    Ok(HttpResponse::Ok().json(json!({ "token": token, "user_id": user.id })))
}
