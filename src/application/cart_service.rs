use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::CartStore;

#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Merge-or-insert: a repeat add for the same product increments the
    /// existing line instead of appending a second one.
    pub fn add_to_cart(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), DomainError> {
        if quantity < 1 {
            return Err(DomainError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        self.store.upsert_cart_line(account_id, product_id, quantity)
    }

    /// A repeat wishlist add is a no-op.
    pub fn add_to_wishlist(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        self.store.add_wishlist_line(account_id, product_id)
    }

    /// No-op when the line is absent.
    pub fn remove_from_cart(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        self.store.remove_cart_line(account_id, product_id)
    }

    pub fn remove_from_wishlist(
        &self,
        account_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), DomainError> {
        self.store.remove_wishlist_line(account_id, product_id)
    }

    pub fn clear_cart(&self, account_id: Uuid) -> Result<(), DomainError> {
        self.store.clear_cart(account_id)
    }
}
