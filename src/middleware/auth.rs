use actix_web::{Error, HttpMessage, HttpRequest, dev::ServiceRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::user::service::UserService;
use crate::utils::error::CustomError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub exp: usize,
}

/// Identity resolved by the auth middleware, attached to request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: ObjectId,
    pub username: String,
    pub email: String,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string())
}

/// Create a signed JWT for a user id, valid for one day.
pub fn create_token(user_id: &str) -> Result<String, CustomError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::days(1))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|_| CustomError::InternalServerError("Token generation failed".to_string()))
}

fn decode_token(token: &str) -> Result<Claims, CustomError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| CustomError::UnauthorizedError("Not authorized, token failed".to_string()))
}

/// Verify the bearer token and resolve the embedded user id against the
/// users collection. The resolved identity is attached to the request
/// extensions for handlers to read via [`authenticated_user`].
pub async fn verify_token(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        return Err((
            CustomError::UnauthorizedError("Not authorized, no token".to_string()).into(),
            req,
        ));
    };

    let claims = match decode_token(credentials.token()) {
        Ok(claims) => claims,
        Err(e) => return Err((e.into(), req)),
    };

    let Ok(user_id) = ObjectId::parse_str(&claims.id) else {
        return Err((
            CustomError::UnauthorizedError("Not authorized, token failed".to_string()).into(),
            req,
        ));
    };

    let Some(user_service) = req.app_data::<web::Data<UserService>>().cloned() else {
        return Err((
            CustomError::InternalServerError("User service is not configured".to_string()).into(),
            req,
        ));
    };

    match user_service.find_user_by_id(&user_id).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(AuthenticatedUser {
                id: user.id.unwrap_or(user_id),
                username: user.username,
                email: user.email,
            });
            Ok(req)
        }
        _ => Err((
            CustomError::UnauthorizedError("Not authorized, token failed".to_string()).into(),
            req,
        )),
    }
}

/// Get the identity attached by the auth middleware.
pub fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, CustomError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| CustomError::UnauthorizedError("Not authorized, no token".to_string()))
}
