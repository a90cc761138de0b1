use crate::{auth::jwt::verify_access_token, config::Config, error::AppError};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // set by auth_middleware on protected scopes
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(AppError::unauthorized("Missing token").into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(AppError::config("Config missing").into())),
        };

        ready(
            verify_access_token(token, &config.jwt_secret)
                .map(AuthUser::from)
                .map_err(Into::into),
        )
    }
}

impl From<crate::models::Claims> for AuthUser {
    fn from(claims: crate::models::Claims) -> Self {
        AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            employee_id: claims.employee_id,
        }
    }
}
