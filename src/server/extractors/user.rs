use crate::{server::app_state::AppState, users::User};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::{future::Future, pin::Pin};

/// Extracts the authenticated user from the `Authorization: Bearer` header.
/// Handlers that take a `User` argument cannot run without a valid token.
impl FromRequest for User {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = web::Data::<AppState>::extract(&req).await?;

            let Some(bearer_auth) = Option::<BearerAuth>::extract(&req).await? else {
                return Err(crate::error::Error::authentication("Authentication required.").into());
            };

            state
                .api
                .security()
                .authenticate(bearer_auth.token())
                .await
                .map_err(Into::into)
        })
    }
}
