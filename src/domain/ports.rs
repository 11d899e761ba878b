use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::account::{Account, Address, LookupKey, NewAccount, NewAddress, OtpProbe};
use super::errors::DomainError;
use super::order::{CancelOutcome, NewOrderRecord, OrderView, ProductSnapshot};

pub trait AccountRepository: Send + Sync + 'static {
    /// Insert a new account. A duplicate contact address is a
    /// `DomainError::Conflict`, enforced atomically by the store.
    fn create(&self, account: NewAccount) -> Result<Account, DomainError>;

    fn find(&self, key: &LookupKey) -> Result<Option<Account>, DomainError>;

    fn exists(&self, account_id: Uuid) -> Result<bool, DomainError>;

    /// Overwrite the password digest. Returns false when no such account.
    fn update_password(&self, account_id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Write the code and expiry as one atomic pair, replacing any pending
    /// passcode. Returns false when no account has that contact.
    fn store_otp(
        &self,
        contact: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Compare-and-clear: consume the passcode only if it matches `code` and
    /// is unexpired at `now`. Returns true when this call consumed it.
    fn claim_otp(&self, contact: &str, code: &str, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Inspect the OTP slot to classify a failed claim.
    fn otp_state(&self, contact: &str) -> Result<OtpProbe, DomainError>;
}

pub trait CartStore: Send + Sync + 'static {
    /// Merge-or-insert in a single atomic upsert keyed by
    /// `(account_id, product_id)`; an existing line's quantity is incremented.
    fn upsert_cart_line(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), DomainError>;

    /// Idempotent wishlist insertion; a repeat add is a no-op.
    fn add_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError>;

    /// No-op when the line is absent.
    fn remove_cart_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError>;

    fn remove_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError>;

    fn clear_cart(&self, account_id: Uuid) -> Result<(), DomainError>;
}

pub trait AddressBook: Send + Sync + 'static {
    fn add(&self, account_id: Uuid, address: NewAddress) -> Result<Address, DomainError>;

    /// Resolve an address id within the given account's collection only.
    fn resolve(&self, account_id: Uuid, address_id: Uuid) -> Result<Option<Address>, DomainError>;
}

pub trait CatalogLookup: Send + Sync + 'static {
    /// Resolve every id, preserving request order. All-or-nothing: any
    /// unresolved id fails the whole batch with `NotFound("product")`.
    fn resolve_all(&self, product_ids: &[Uuid]) -> Result<Vec<ProductSnapshot>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, record: NewOrderRecord) -> Result<OrderView, DomainError>;

    fn list(&self) -> Result<Vec<OrderView>, DomainError>;

    /// Guarded single-statement cancel: only a pending, undelivered order
    /// owned by `account_id` transitions to cancelled.
    fn cancel(&self, account_id: Uuid, order_id: Uuid) -> Result<CancelOutcome, DomainError>;
}

pub trait NotificationGateway: Send + Sync + 'static {
    /// Deliver a passcode to the contact address. Must not return Ok unless
    /// the send attempt completed.
    fn send_otp(&self, contact: &str, code: &str) -> Result<(), DomainError>;
}
