use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{accounts, addresses, cart_lines, orders, products, wishlist_lines};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password_hash: String,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = addresses)]
#[diesel(belongs_to(AccountRow, foreign_key = account_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub struct NewAddressRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = cart_lines)]
#[diesel(primary_key(account_id, product_id))]
#[diesel(belongs_to(AccountRow, foreign_key = account_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLineRow {
    pub account_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_lines)]
pub struct NewCartLineRow {
    pub account_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = wishlist_lines)]
#[diesel(primary_key(account_id, product_id))]
#[diesel(belongs_to(AccountRow, foreign_key = account_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistLineRow {
    pub account_id: Uuid,
    pub product_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wishlist_lines)]
pub struct NewWishlistLineRow {
    pub account_id: Uuid,
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shipping_address: Value,
    pub product_snapshots: Value,
    pub placed_at: DateTime<Utc>,
    pub payment_method: String,
    pub payment_status: String,
    pub delivered: bool,
    pub order_status: String,
    pub total_price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shipping_address: Value,
    pub product_snapshots: Value,
    pub payment_method: String,
    pub payment_status: String,
    pub total_price: BigDecimal,
}
