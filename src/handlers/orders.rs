use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::account::NewAddress;
use crate::domain::order::{AddressSnapshot, OrderView, ProductSnapshot};
use crate::errors::AppError;
use crate::state::AppState;

use super::accounts::AddressResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub address_id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub payment_method: String,
    /// Decimal total as a string to avoid floating-point issues, e.g. "149.99"
    pub total_price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddAddressRequest {
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSnapshotResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub description: String,
}

impl From<ProductSnapshot> for ProductSnapshotResponse {
    fn from(p: ProductSnapshot) -> Self {
        ProductSnapshotResponse {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
            description: p.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressSnapshotResponse {
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

impl From<AddressSnapshot> for AddressSnapshotResponse {
    fn from(a: AddressSnapshot) -> Self {
        AddressSnapshotResponse {
            recipient: a.recipient,
            street: a.street,
            district: a.district,
            state: a.state,
            pincode: a.pincode,
            contact_phone: a.contact_phone,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shipping_address: AddressSnapshotResponse,
    pub products: Vec<ProductSnapshotResponse>,
    pub placed_at: String,
    pub payment_method: String,
    pub payment_status: String,
    pub delivered: bool,
    pub order_status: String,
    pub total_price: String,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            account_id: o.account_id,
            shipping_address: o.shipping_address.into(),
            products: o.products.into_iter().map(Into::into).collect(),
            placed_at: o.placed_at.to_rfc3339(),
            payment_method: o.payment_method,
            payment_status: o.payment_status.as_str().to_string(),
            delivered: o.delivered,
            order_status: o.order_status,
            total_price: o.total_price.to_string(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /accounts/{account_id}/orders
///
/// All-or-nothing: one unresolved product id fails the whole request and no
/// order is created.
#[utoipa::path(
    post,
    path = "/accounts/{account_id}/orders",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 404, description = "Account, address or product not found"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let body = body.into_inner();

    let total_price = BigDecimal::from_str(&body.total_price).map_err(|e| {
        AppError::Validation(format!("invalid total_price '{}': {}", body.total_price, e))
    })?;

    let order = web::block(move || {
        state.orders.place_order(
            account_id,
            body.address_id,
            body.product_ids,
            body.payment_method,
            total_price,
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Admin-facing unfiltered scan.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.list_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let orders: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(orders))
}

/// DELETE /accounts/{account_id}/orders/{order_id}
///
/// Cancellation is permitted only while payment is pending and the order is
/// undelivered.
#[utoipa::path(
    delete,
    path = "/accounts/{account_id}/orders/{order_id}",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order cancelled"),
        (status = 404, description = "Order not found for this account"),
        (status = 409, description = "Order is no longer cancellable"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (account_id, order_id) = path.into_inner();

    web::block(move || state.orders.cancel_order(account_id, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Order cancelled" })))
}

/// POST /accounts/{account_id}/addresses
#[utoipa::path(
    post,
    path = "/accounts/{account_id}/addresses",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    request_body = AddAddressRequest,
    responses(
        (status = 201, description = "Address added", body = AddressResponse),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Account not found"),
    ),
    tag = "orders"
)]
pub async fn add_address(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddAddressRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let body = body.into_inner();

    let address = web::block(move || {
        state.orders.add_address(
            account_id,
            NewAddress {
                recipient: body.recipient,
                street: body.street,
                district: body.district,
                state: body.state,
                pincode: body.pincode,
                contact_phone: body.contact_phone,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(AddressResponse {
        id: address.id,
        recipient: address.recipient,
        street: address.street,
        district: address.district,
        state: address.state,
        pincode: address.pincode,
        contact_phone: address.contact_phone,
    }))
}
