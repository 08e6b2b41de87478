use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::middleware::auth::create_token;
use crate::user::model::CreateUserRequest;
use crate::user::service::UserService;
use crate::utils::error::CustomError;
use crate::utils::model::LoginRequest;

pub async fn register_user(
    user_service: web::Data<UserService>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();
    let user = user_service
        .create_user(body.username, body.email, body.password)
        .await?;

    let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
    let token = create_token(&user_id)?;

    Ok(HttpResponse::Created().json(json!({
        "id": user_id,
        "username": user.username,
        "email": user.email,
        "token": token,
    })))
}

pub async fn login_user(
    user_service: web::Data<UserService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, CustomError> {
    let body = body.into_inner();
    let user = user_service
        .verify_credentials(&body.email, &body.password)
        .await?;

    let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
    let token = create_token(&user_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "id": user_id,
        "username": user.username,
        "email": user.email,
        "token": token,
    })))
}
