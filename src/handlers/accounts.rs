use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::account::{Account, LookupKey};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FederatedRegisterRequest {
    pub name: String,
    pub mail: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueOtpRequest {
    pub contact: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub contact: String,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistLineResponse {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: Uuid,
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

/// The outward account shape. Carries neither the password digest nor any
/// OTP state.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub cart: Vec<CartLineResponse>,
    pub wishlist: Vec<WishlistLineResponse>,
    pub addresses: Vec<AddressResponse>,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        AccountResponse {
            id: a.id,
            name: a.name,
            mail: a.mail,
            phone: a.phone,
            cart: a
                .cart
                .into_iter()
                .map(|l| CartLineResponse {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
            wishlist: a
                .wishlist
                .into_iter()
                .map(|l| WishlistLineResponse {
                    product_id: l.product_id,
                })
                .collect(),
            addresses: a
                .addresses
                .into_iter()
                .map(|addr| AddressResponse {
                    id: addr.id,
                    recipient: addr.recipient,
                    street: addr.street,
                    district: addr.district,
                    state: addr.state,
                    pincode: addr.pincode,
                    contact_phone: addr.contact_phone,
                })
                .collect(),
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /accounts
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Contact address already registered"),
    ),
    tag = "accounts"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let account = web::block(move || {
        state
            .identity
            .register(&body.name, &body.mail, &body.phone, &body.password)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// POST /accounts/federated
///
/// Registration for contacts already verified by an external identity
/// provider; no password is taken.
#[utoipa::path(
    post,
    path = "/accounts/federated",
    request_body = FederatedRegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Contact address already registered"),
    ),
    tag = "accounts"
)]
pub async fn register_federated(
    state: web::Data<AppState>,
    body: web::Json<FederatedRegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let account =
        web::block(move || state.identity.register_federated(&body.name, &body.mail))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// GET /accounts/{identifier}
///
/// The path segment is mapped onto a tagged lookup key at this boundary: a
/// UUID-shaped identifier looks up by id, anything else by contact address.
#[utoipa::path(
    get,
    path = "/accounts/{identifier}",
    params(
        ("identifier" = String, Path, description = "Account id or contact address"),
    ),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found"),
    ),
    tag = "accounts"
)]
pub async fn lookup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let identifier = path.into_inner();
    let key = match Uuid::parse_str(&identifier) {
        Ok(id) => LookupKey::ById(id),
        Err(_) => LookupKey::ByContact(identifier),
    };

    let account = web::block(move || state.identity.lookup(&key))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// PUT /accounts/{account_id}/password
#[utoipa::path(
    put,
    path = "/accounts/{account_id}/password",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Password too weak"),
        (status = 404, description = "Account not found"),
    ),
    tag = "accounts"
)]
pub async fn change_password(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let body = body.into_inner();

    web::block(move || state.identity.change_password(account_id, &body.password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Password updated" })))
}

/// POST /accounts/otp
#[utoipa::path(
    post,
    path = "/accounts/otp",
    request_body = IssueOtpRequest,
    responses(
        (status = 200, description = "Passcode dispatched"),
        (status = 404, description = "Unknown contact address"),
    ),
    tag = "accounts"
)]
pub async fn issue_otp(
    state: web::Data<AppState>,
    body: web::Json<IssueOtpRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    web::block(move || state.identity.issue_otp(&body.contact))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Passcode dispatched" })))
}

/// POST /accounts/otp/verify
#[utoipa::path(
    post,
    path = "/accounts/otp/verify",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Passcode verified and consumed"),
        (status = 401, description = "Passcode does not match"),
        (status = 410, description = "Passcode has expired"),
        (status = 404, description = "Unknown contact address"),
    ),
    tag = "accounts"
)]
pub async fn verify_otp(
    state: web::Data<AppState>,
    body: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    web::block(move || state.identity.verify_otp(&body.contact, &body.code))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Passcode verified" })))
}
