use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::account::{Address, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::order::{AddressSnapshot, CancelOutcome, NewOrderRecord, OrderView};
use crate::domain::ports::{AccountRepository, AddressBook, CatalogLookup, OrderRepository};

#[derive(Clone)]
pub struct OrderService {
    accounts: Arc<dyn AccountRepository>,
    address_book: Arc<dyn AddressBook>,
    catalog: Arc<dyn CatalogLookup>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        address_book: Arc<dyn AddressBook>,
        catalog: Arc<dyn CatalogLookup>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            accounts,
            address_book,
            catalog,
            orders,
        }
    }

    /// Validate the checkout request against the account's address book and
    /// the catalog, then persist an immutable order snapshot. Product
    /// resolution is all-or-nothing: one unknown id fails the whole request
    /// and no order is created.
    pub fn place_order(
        &self,
        account_id: Uuid,
        address_id: Uuid,
        product_ids: Vec<Uuid>,
        payment_method: String,
        total_price: BigDecimal,
    ) -> Result<OrderView, DomainError> {
        if payment_method.trim().is_empty() {
            return Err(DomainError::Validation(
                "payment method is required".to_string(),
            ));
        }
        if product_ids.is_empty() {
            return Err(DomainError::Validation(
                "at least one product is required".to_string(),
            ));
        }
        if total_price < BigDecimal::from(0) {
            return Err(DomainError::Validation(
                "total price must not be negative".to_string(),
            ));
        }

        if !self.accounts.exists(account_id)? {
            return Err(DomainError::NotFound("account"));
        }

        let address = self
            .address_book
            .resolve(account_id, address_id)?
            .ok_or(DomainError::NotFound("address"))?;

        let products = self.catalog.resolve_all(&product_ids)?;

        // The caller-supplied total is stored as-is; a drift against the
        // snapshot sum is only logged.
        let snapshot_total = products
            .iter()
            .fold(BigDecimal::from(0), |acc, p| acc + &p.price);
        if snapshot_total != total_price {
            log::warn!(
                "order total {} for account {} differs from snapshot total {}",
                total_price,
                account_id,
                snapshot_total
            );
        }

        self.orders.create(NewOrderRecord {
            account_id,
            shipping_address: AddressSnapshot::from(&address),
            products,
            payment_method,
            total_price,
        })
    }

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.orders.list()
    }

    /// Cancellation is permitted only while payment is pending and the order
    /// is undelivered.
    pub fn cancel_order(&self, account_id: Uuid, order_id: Uuid) -> Result<(), DomainError> {
        match self.orders.cancel(account_id, order_id)? {
            CancelOutcome::Cancelled => Ok(()),
            CancelOutcome::NotFound => Err(DomainError::NotFound("order")),
            CancelOutcome::NotCancellable => Err(DomainError::Conflict(
                "order is no longer cancellable".to_string(),
            )),
        }
    }

    pub fn add_address(
        &self,
        account_id: Uuid,
        address: NewAddress,
    ) -> Result<Address, DomainError> {
        let blank = [
            &address.recipient,
            &address.street,
            &address.district,
            &address.state,
            &address.pincode,
            &address.contact_phone,
        ]
        .iter()
        .any(|f| f.trim().is_empty());
        if blank {
            return Err(DomainError::Validation(
                "all address fields are required".to_string(),
            ));
        }

        if !self.accounts.exists(account_id)? {
            return Err(DomainError::NotFound("account"));
        }

        self.address_book.add(account_id, address)
    }
}
