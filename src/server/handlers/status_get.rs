use crate::error::Error;
use actix_web::HttpResponse;
use serde_json::json;

pub async fn status_get() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(json!({ "status": "healthy", "service": "pwdvault" })))
}
