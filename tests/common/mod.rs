//! In-memory port implementations shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use commerce_service::application::admin_auth::AdminCredentials;
use commerce_service::application::cart_service::CartService;
use commerce_service::application::credentials;
use commerce_service::application::identity_service::IdentityService;
use commerce_service::application::order_service::OrderService;
use commerce_service::domain::account::{
    Account, Address, CartLine, LookupKey, NewAccount, NewAddress, OtpProbe, StoredOtp,
    WishlistLine,
};
use commerce_service::domain::errors::DomainError;
use commerce_service::domain::order::{
    CancelOutcome, NewOrderRecord, OrderView, PaymentStatus, ProductSnapshot,
};
use commerce_service::domain::ports::{
    AccountRepository, AddressBook, CartStore, CatalogLookup, NotificationGateway, OrderRepository,
};

#[derive(Clone, Debug)]
pub struct StoredAccount {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
    pub phone: String,
    pub password_hash: String,
    pub otp: Option<StoredOtp>,
    pub cart: Vec<CartLine>,
    pub wishlist: Vec<WishlistLine>,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

impl StoredAccount {
    fn to_account(&self) -> Account {
        Account {
            id: self.id,
            name: self.name.clone(),
            mail: self.mail.clone(),
            phone: self.phone.clone(),
            password_hash: self.password_hash.clone(),
            cart: self.cart.clone(),
            wishlist: self.wishlist.clone(),
            addresses: self.addresses.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account aggregate store: accounts, lines and addresses behind one lock.
#[derive(Default)]
pub struct InMemoryStore {
    pub accounts: Mutex<Vec<StoredAccount>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn account_by_mail(&self, mail: &str) -> Option<StoredAccount> {
        self.accounts
            .lock()
            .expect("store lock poisoned")
            .iter()
            .find(|a| a.mail == mail)
            .cloned()
    }

    /// Test hook: age the pending passcode so it reads as expired.
    pub fn expire_otp(&self, mail: &str) {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.mail == mail)
            .expect("account should exist");
        if let Some(otp) = account.otp.as_mut() {
            otp.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

impl AccountRepository for InMemoryStore {
    fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        if accounts.iter().any(|a| a.mail == account.mail) {
            return Err(DomainError::Conflict(
                "contact address is already registered".to_string(),
            ));
        }
        let stored = StoredAccount {
            id: Uuid::new_v4(),
            name: account.name,
            mail: account.mail,
            phone: account.phone,
            password_hash: account.password_hash,
            otp: None,
            cart: vec![],
            wishlist: vec![],
            addresses: vec![],
            created_at: Utc::now(),
        };
        let created = stored.to_account();
        accounts.push(stored);
        Ok(created)
    }

    fn find(&self, key: &LookupKey) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().expect("store lock poisoned");
        let found = match key {
            LookupKey::ById(id) => accounts.iter().find(|a| a.id == *id),
            LookupKey::ByContact(mail) => accounts.iter().find(|a| a.mail == *mail),
        };
        Ok(found.map(StoredAccount::to_account))
    }

    fn exists(&self, account_id: Uuid) -> Result<bool, DomainError> {
        let accounts = self.accounts.lock().expect("store lock poisoned");
        Ok(accounts.iter().any(|a| a.id == account_id))
    }

    fn update_password(&self, account_id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        match accounts.iter_mut().find(|a| a.id == account_id) {
            Some(a) => {
                a.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn store_otp(
        &self,
        contact: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        match accounts.iter_mut().find(|a| a.mail == contact) {
            Some(a) => {
                a.otp = Some(StoredOtp {
                    code: code.to_string(),
                    expires_at,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn claim_otp(
        &self,
        contact: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let Some(account) = accounts.iter_mut().find(|a| a.mail == contact) else {
            return Ok(false);
        };
        let claimable = account
            .otp
            .as_ref()
            .is_some_and(|otp| otp.code == code && otp.expires_at > now);
        if claimable {
            account.otp = None;
        }
        Ok(claimable)
    }

    fn otp_state(&self, contact: &str) -> Result<OtpProbe, DomainError> {
        let accounts = self.accounts.lock().expect("store lock poisoned");
        Ok(match accounts.iter().find(|a| a.mail == contact) {
            None => OtpProbe::NoAccount,
            Some(a) => match &a.otp {
                Some(otp) => OtpProbe::Present(otp.clone()),
                None => OtpProbe::NoneIssued,
            },
        })
    }
}

impl CartStore for InMemoryStore {
    fn upsert_cart_line(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        match account.cart.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => account.cart.push(CartLine {
                product_id,
                quantity,
            }),
        }
        Ok(())
    }

    fn add_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        if !account.wishlist.iter().any(|l| l.product_id == product_id) {
            account.wishlist.push(WishlistLine { product_id });
        }
        Ok(())
    }

    fn remove_cart_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        account.cart.retain(|l| l.product_id != product_id);
        Ok(())
    }

    fn remove_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        account.wishlist.retain(|l| l.product_id != product_id);
        Ok(())
    }

    fn clear_cart(&self, account_id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        account.cart.clear();
        Ok(())
    }
}

impl AddressBook for InMemoryStore {
    fn add(&self, account_id: Uuid, address: NewAddress) -> Result<Address, DomainError> {
        let mut accounts = self.accounts.lock().expect("store lock poisoned");
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or(DomainError::NotFound("account"))?;
        let created = Address {
            id: Uuid::new_v4(),
            recipient: address.recipient,
            street: address.street,
            district: address.district,
            state: address.state,
            pincode: address.pincode,
            contact_phone: address.contact_phone,
        };
        account.addresses.push(created.clone());
        Ok(created)
    }

    fn resolve(&self, account_id: Uuid, address_id: Uuid) -> Result<Option<Address>, DomainError> {
        let accounts = self.accounts.lock().expect("store lock poisoned");
        Ok(accounts
            .iter()
            .find(|a| a.id == account_id)
            .and_then(|a| a.addresses.iter().find(|addr| addr.id == address_id))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCatalog {
    pub products: Mutex<HashMap<Uuid, ProductSnapshot>>,
}

impl InMemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, product: ProductSnapshot) -> Uuid {
        let id = product.id;
        self.products
            .lock()
            .expect("catalog lock poisoned")
            .insert(id, product);
        id
    }

    pub fn remove(&self, id: Uuid) {
        self.products
            .lock()
            .expect("catalog lock poisoned")
            .remove(&id);
    }

    pub fn set_price(&self, id: Uuid, price: bigdecimal::BigDecimal) {
        if let Some(p) = self
            .products
            .lock()
            .expect("catalog lock poisoned")
            .get_mut(&id)
        {
            p.price = price;
        }
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn resolve_all(&self, product_ids: &[Uuid]) -> Result<Vec<ProductSnapshot>, DomainError> {
        let products = self.products.lock().expect("catalog lock poisoned");
        product_ids
            .iter()
            .map(|id| {
                products
                    .get(id)
                    .cloned()
                    .ok_or(DomainError::NotFound("product"))
            })
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    pub orders: Mutex<Vec<OrderView>>,
}

impl InMemoryOrders {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Test hook: flip an order's delivered flag, as a fulfillment
    /// collaborator would.
    pub fn mark_delivered(&self, order_id: Uuid) {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        if let Some(o) = orders.iter_mut().find(|o| o.id == order_id) {
            o.delivered = true;
        }
    }
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, record: NewOrderRecord) -> Result<OrderView, DomainError> {
        let order = OrderView {
            id: Uuid::new_v4(),
            account_id: record.account_id,
            shipping_address: record.shipping_address,
            products: record.products,
            placed_at: Utc::now(),
            payment_method: record.payment_method,
            payment_status: PaymentStatus::Pending,
            delivered: false,
            order_status: "pending".to_string(),
            total_price: record.total_price,
        };
        self.orders
            .lock()
            .expect("orders lock poisoned")
            .push(order.clone());
        Ok(order)
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        Ok(self.orders.lock().expect("orders lock poisoned").clone())
    }

    fn cancel(&self, account_id: Uuid, order_id: Uuid) -> Result<CancelOutcome, DomainError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.id == order_id && o.account_id == account_id)
        else {
            return Ok(CancelOutcome::NotFound);
        };
        if order.payment_status != PaymentStatus::Pending || order.delivered {
            return Ok(CancelOutcome::NotCancellable);
        }
        order.order_status = "cancelled".to_string();
        Ok(CancelOutcome::Cancelled)
    }
}

/// Records sends instead of talking SMTP; can be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail_next: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_code(&self, contact: &str) -> Option<String> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .rev()
            .find(|(to, _)| to == contact)
            .map(|(_, code)| code.clone())
    }
}

impl NotificationGateway for RecordingNotifier {
    fn send_otp(&self, contact: &str, code: &str) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Internal("passcode delivery failed".to_string()));
        }
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push((contact.to_string(), code.to_string()));
        Ok(())
    }
}

/// Everything the service-level tests need, wired over the fakes.
pub struct TestHarness {
    pub store: Arc<InMemoryStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub order_store: Arc<InMemoryOrders>,
    pub notifier: Arc<RecordingNotifier>,
    pub identity: IdentityService,
    pub carts: CartService,
    pub orders: OrderService,
}

pub fn harness() -> TestHarness {
    let store = InMemoryStore::new();
    let catalog = InMemoryCatalog::new();
    let order_store = InMemoryOrders::new();
    let notifier = RecordingNotifier::new();

    let identity = IdentityService::new(store.clone(), notifier.clone());
    let carts = CartService::new(store.clone());
    let orders = OrderService::new(
        store.clone(),
        store.clone(),
        catalog.clone(),
        order_store.clone(),
    );

    TestHarness {
        store,
        catalog,
        order_store,
        notifier,
        identity,
        carts,
        orders,
    }
}

pub fn snapshot(name: &str, unit_price: &str) -> ProductSnapshot {
    use std::str::FromStr;

    ProductSnapshot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: bigdecimal::BigDecimal::from_str(unit_price).expect("valid decimal"),
        description: format!("{name} description"),
    }
}

pub fn admin_credentials(password: &str) -> AdminCredentials {
    AdminCredentials {
        username: "admin".to_string(),
        password_hash: credentials::hash(password).expect("hashing failed"),
    }
}
