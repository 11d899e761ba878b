use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddWishlistLineRequest {
    pub product_id: Uuid,
}

/// POST /accounts/{account_id}/cart
///
/// Merge-or-insert: repeating a product increments its line instead of
/// appending a duplicate.
#[utoipa::path(
    post,
    path = "/accounts/{account_id}/cart",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    request_body = AddCartLineRequest,
    responses(
        (status = 200, description = "Product added to cart"),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Account not found"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddCartLineRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let body = body.into_inner();

    web::block(move || state.carts.add_to_cart(account_id, body.product_id, body.quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product added to cart" })))
}

/// DELETE /accounts/{account_id}/cart/{product_id}
///
/// Removing an absent line is a no-op, not an error.
#[utoipa::path(
    delete,
    path = "/accounts/{account_id}/cart/{product_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
        ("product_id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product removed from cart"),
        (status = 404, description = "Account not found"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (account_id, product_id) = path.into_inner();

    web::block(move || state.carts.remove_from_cart(account_id, product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product removed from cart" })))
}

/// DELETE /accounts/{account_id}/cart
#[utoipa::path(
    delete,
    path = "/accounts/{account_id}/cart",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    responses(
        (status = 200, description = "Cart cleared"),
        (status = 404, description = "Account not found"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();

    web::block(move || state.carts.clear_cart(account_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared" })))
}

/// POST /accounts/{account_id}/wishlist
///
/// A repeat add is idempotent.
#[utoipa::path(
    post,
    path = "/accounts/{account_id}/wishlist",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    request_body = AddWishlistLineRequest,
    responses(
        (status = 200, description = "Product added to wishlist"),
        (status = 404, description = "Account not found"),
    ),
    tag = "cart"
)]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddWishlistLineRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let body = body.into_inner();

    web::block(move || state.carts.add_to_wishlist(account_id, body.product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product added to wishlist" })))
}

/// DELETE /accounts/{account_id}/wishlist/{product_id}
#[utoipa::path(
    delete,
    path = "/accounts/{account_id}/wishlist/{product_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
        ("product_id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product removed from wishlist"),
        (status = 404, description = "Account not found"),
    ),
    tag = "cart"
)]
pub async fn remove_from_wishlist(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (account_id, product_id) = path.into_inner();

    web::block(move || state.carts.remove_from_wishlist(account_id, product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product removed from wishlist" })))
}
