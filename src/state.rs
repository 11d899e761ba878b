use std::sync::Arc;

use crate::application::admin_auth::{AdminAuthService, AdminCredentials};
use crate::application::cart_service::CartService;
use crate::application::identity_service::IdentityService;
use crate::application::order_service::OrderService;
use crate::config::Config;
use crate::db::DbPool;
use crate::domain::ports::{
    AccountRepository, AddressBook, CartStore, CatalogLookup, NotificationGateway, OrderRepository,
};
use crate::infrastructure::account_repo::{DieselAccountRepository, DieselAddressBook};
use crate::infrastructure::cart_store::DieselCartStore;
use crate::infrastructure::catalog::DieselCatalog;
use crate::infrastructure::order_repo::DieselOrderRepository;

/// Shared application services, one instance per server.
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub carts: CartService,
    pub orders: OrderService,
    pub admin: AdminAuthService,
}

impl AppState {
    /// Production wiring: Diesel adapters over the connection pool.
    pub fn new(pool: DbPool, config: &Config, notifier: Arc<dyn NotificationGateway>) -> Self {
        let accounts: Arc<dyn AccountRepository> =
            Arc::new(DieselAccountRepository::new(pool.clone()));
        let cart_store: Arc<dyn CartStore> = Arc::new(DieselCartStore::new(pool.clone()));
        let address_book: Arc<dyn AddressBook> = Arc::new(DieselAddressBook::new(pool.clone()));
        let catalog: Arc<dyn CatalogLookup> = Arc::new(DieselCatalog::new(pool.clone()));
        let orders: Arc<dyn OrderRepository> = Arc::new(DieselOrderRepository::new(pool));

        Self::with_ports(
            accounts,
            cart_store,
            address_book,
            catalog,
            orders,
            notifier,
            config.admin.clone(),
            config.secret_key.as_bytes().to_vec(),
        )
    }

    /// Wiring from explicit port implementations; tests assemble the state
    /// over in-memory adapters through this.
    #[allow(clippy::too_many_arguments)]
    pub fn with_ports(
        accounts: Arc<dyn AccountRepository>,
        cart_store: Arc<dyn CartStore>,
        address_book: Arc<dyn AddressBook>,
        catalog: Arc<dyn CatalogLookup>,
        orders: Arc<dyn OrderRepository>,
        notifier: Arc<dyn NotificationGateway>,
        admin: AdminCredentials,
        secret_key: Vec<u8>,
    ) -> Self {
        AppState {
            identity: IdentityService::new(accounts.clone(), notifier),
            carts: CartService::new(cart_store),
            orders: OrderService::new(accounts, address_book, catalog, orders),
            admin: AdminAuthService::new(admin, secret_key),
        }
    }
}
