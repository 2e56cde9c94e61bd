use crate::{error::Error, server::app_state::AppState, users::User};
use actix_web::{HttpResponse, web};

pub async fn vault_entries_list(
    state: web::Data<AppState>,
    user: User,
) -> Result<HttpResponse, Error> {
    let entries = state.api.vault(&user).list_entries().await?;
    Ok(HttpResponse::Ok().json(entries))
}
