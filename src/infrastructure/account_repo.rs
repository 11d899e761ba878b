use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::account::{
    Account, Address, CartLine, LookupKey, NewAccount, NewAddress, OtpProbe, StoredOtp,
    WishlistLine,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountRepository, AddressBook};
use crate::schema::{accounts, addresses, cart_lines, wishlist_lines};

use super::models::{AccountRow, AddressRow, CartLineRow, NewAccountRow, NewAddressRow, WishlistLineRow};

fn address_from_row(row: AddressRow) -> Address {
    Address {
        id: row.id,
        recipient: row.recipient,
        street: row.street,
        district: row.district,
        state: row.state,
        pincode: row.pincode,
        contact_phone: row.contact_phone,
    }
}

pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn load_collections(
        conn: &mut PgConnection,
        row: AccountRow,
    ) -> Result<Account, DomainError> {
        let cart = cart_lines::table
            .filter(cart_lines::account_id.eq(row.id))
            .order(cart_lines::added_at.asc())
            .select(CartLineRow::as_select())
            .load(conn)?;

        let wishlist = wishlist_lines::table
            .filter(wishlist_lines::account_id.eq(row.id))
            .order(wishlist_lines::added_at.asc())
            .select(WishlistLineRow::as_select())
            .load(conn)?;

        let address_rows = addresses::table
            .filter(addresses::account_id.eq(row.id))
            .order(addresses::created_at.asc())
            .select(AddressRow::as_select())
            .load(conn)?;

        Ok(Account {
            id: row.id,
            name: row.name,
            mail: row.mail,
            phone: row.phone,
            password_hash: row.password_hash,
            cart: cart
                .into_iter()
                .map(|l| CartLine {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
            wishlist: wishlist
                .into_iter()
                .map(|l| WishlistLine {
                    product_id: l.product_id,
                })
                .collect(),
            addresses: address_rows.into_iter().map(address_from_row).collect(),
            created_at: row.created_at,
        })
    }
}

impl AccountRepository for DieselAccountRepository {
    fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let mut conn = self.pool.get()?;

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(&NewAccountRow {
                id: Uuid::new_v4(),
                name: account.name,
                mail: account.mail,
                phone: account.phone,
                password_hash: account.password_hash,
            })
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::Conflict("contact address is already registered".to_string())
                }
                other => other.into(),
            })?;

        // Fresh account: no lines, no addresses, no round trips needed.
        Ok(Account {
            id: row.id,
            name: row.name,
            mail: row.mail,
            phone: row.phone,
            password_hash: row.password_hash,
            cart: vec![],
            wishlist: vec![],
            addresses: vec![],
            created_at: row.created_at,
        })
    }

    fn find(&self, key: &LookupKey) -> Result<Option<Account>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = match key {
            LookupKey::ById(id) => accounts::table
                .filter(accounts::id.eq(id))
                .select(AccountRow::as_select())
                .first(&mut conn)
                .optional()?,
            LookupKey::ByContact(mail) => accounts::table
                .filter(accounts::mail.eq(mail))
                .select(AccountRow::as_select())
                .first(&mut conn)
                .optional()?,
        };

        match row {
            Some(row) => Ok(Some(Self::load_collections(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn exists(&self, account_id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let found = diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::id.eq(account_id)),
        ))
        .get_result(&mut conn)?;
        Ok(found)
    }

    fn update_password(&self, account_id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(accounts::table.filter(accounts::id.eq(account_id)))
            .set(accounts::password_hash.eq(password_hash))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn store_otp(
        &self,
        contact: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        // One statement: the new pair replaces any pending passcode whole.
        let updated = diesel::update(accounts::table.filter(accounts::mail.eq(contact)))
            .set((
                accounts::otp_code.eq(code),
                accounts::otp_expires_at.eq(expires_at),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn claim_otp(
        &self,
        contact: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        // Compare-and-clear: the row qualifies only while the stored code
        // matches and is unexpired, so exactly one caller can win.
        let claimed = diesel::update(
            accounts::table.filter(
                accounts::mail
                    .eq(contact)
                    .and(accounts::otp_code.eq(code))
                    .and(accounts::otp_expires_at.gt(now)),
            ),
        )
        .set((
            accounts::otp_code.eq(None::<String>),
            accounts::otp_expires_at.eq(None::<DateTime<Utc>>),
        ))
        .execute(&mut conn)?;
        Ok(claimed == 1)
    }

    fn otp_state(&self, contact: &str) -> Result<OtpProbe, DomainError> {
        let mut conn = self.pool.get()?;

        let slot: Option<(Option<String>, Option<DateTime<Utc>>)> = accounts::table
            .filter(accounts::mail.eq(contact))
            .select((accounts::otp_code, accounts::otp_expires_at))
            .first(&mut conn)
            .optional()?;

        Ok(match slot {
            None => OtpProbe::NoAccount,
            Some((Some(code), Some(expires_at))) => OtpProbe::Present(StoredOtp { code, expires_at }),
            Some(_) => OtpProbe::NoneIssued,
        })
    }
}

pub struct DieselAddressBook {
    pool: DbPool,
}

impl DieselAddressBook {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AddressBook for DieselAddressBook {
    fn add(&self, account_id: Uuid, address: NewAddress) -> Result<Address, DomainError> {
        let mut conn = self.pool.get()?;

        let row: AddressRow = diesel::insert_into(addresses::table)
            .values(&NewAddressRow {
                id: Uuid::new_v4(),
                account_id,
                recipient: address.recipient,
                street: address.street,
                district: address.district,
                state: address.state,
                pincode: address.pincode,
                contact_phone: address.contact_phone,
            })
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    DomainError::NotFound("account")
                }
                other => other.into(),
            })?;

        Ok(address_from_row(row))
    }

    fn resolve(&self, account_id: Uuid, address_id: Uuid) -> Result<Option<Address>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = addresses::table
            .filter(
                addresses::id
                    .eq(address_id)
                    .and(addresses::account_id.eq(account_id)),
            )
            .select(AddressRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(address_from_row))
    }
}
