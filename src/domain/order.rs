use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Address;

/// Payment leg of the order lifecycle. Independent of delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

/// Catalog state captured at placement time. Later catalog edits never touch
/// a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
}

/// Shipping address copied out of the address book at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    pub recipient: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
    pub contact_phone: String,
}

impl From<&Address> for AddressSnapshot {
    fn from(a: &Address) -> Self {
        AddressSnapshot {
            recipient: a.recipient.clone(),
            street: a.street.clone(),
            district: a.district.clone(),
            state: a.state.clone(),
            pincode: a.pincode.clone(),
            contact_phone: a.contact_phone.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub account_id: Uuid,
    pub shipping_address: AddressSnapshot,
    pub products: Vec<ProductSnapshot>,
    pub payment_method: String,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shipping_address: AddressSnapshot,
    pub products: Vec<ProductSnapshot>,
    pub placed_at: DateTime<Utc>,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub delivered: bool,
    pub order_status: String,
    pub total_price: BigDecimal,
}

/// Outcome of a cancellation attempt, resolved atomically at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotFound,
    NotCancellable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_roundtrips_through_str() {
        assert_eq!(
            PaymentStatus::parse(PaymentStatus::Pending.as_str()),
            Some(PaymentStatus::Pending)
        );
        assert_eq!(
            PaymentStatus::parse(PaymentStatus::Paid.as_str()),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(PaymentStatus::parse("shipped"), None);
    }
}
