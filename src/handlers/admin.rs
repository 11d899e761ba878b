use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /admin/login
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Signed token issued"),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "admin"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let token = web::block(move || state.admin.login(&body.username, &body.password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

/// GET /admin/verify/{token}
#[utoipa::path(
    get,
    path = "/admin/verify/{token}",
    params(
        ("token" = String, Path, description = "Signed admin token"),
    ),
    responses(
        (status = 200, description = "Token is valid for the administrator"),
        (status = 401, description = "Malformed, tampered or expired token"),
        (status = 403, description = "Valid token for a different subject"),
    ),
    tag = "admin"
)]
pub async fn verify_token(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();

    let claims = web::block(move || state.admin.verify_token(&raw))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "valid": true, "username": claims.sub })))
}
