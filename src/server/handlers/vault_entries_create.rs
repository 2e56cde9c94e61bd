use crate::{
    error::Error, server::app_state::AppState, users::User, vault::CreateVaultEntryParams,
};
use actix_web::{HttpResponse, web};

pub async fn vault_entries_create(
    state: web::Data<AppState>,
    user: User,
    body_params: web::Json<CreateVaultEntryParams>,
) -> Result<HttpResponse, Error> {
    let entry = state
        .api
        .vault(&user)
        .create_entry(body_params.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(entry))
}
