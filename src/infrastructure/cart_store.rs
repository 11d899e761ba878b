use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartStore;
use crate::schema::{accounts, cart_lines, wishlist_lines};

use super::models::{NewCartLineRow, NewWishlistLineRow};

pub struct DieselCartStore {
    pool: DbPool,
}

impl DieselCartStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn ensure_account(conn: &mut PgConnection, account_id: Uuid) -> Result<(), DomainError> {
        let found: bool = diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::id.eq(account_id)),
        ))
        .get_result(conn)?;
        if found {
            Ok(())
        } else {
            Err(DomainError::NotFound("account"))
        }
    }
}

impl CartStore for DieselCartStore {
    fn upsert_cart_line(
        &self,
        account_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        Self::ensure_account(&mut conn, account_id)?;

        // Single atomic upsert keyed by (account_id, product_id): two
        // concurrent adds both land, neither overwrites the other.
        diesel::insert_into(cart_lines::table)
            .values(&NewCartLineRow {
                account_id,
                product_id,
                quantity,
            })
            .on_conflict((cart_lines::account_id, cart_lines::product_id))
            .do_update()
            .set(cart_lines::quantity.eq(cart_lines::quantity + excluded(cart_lines::quantity)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn add_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        Self::ensure_account(&mut conn, account_id)?;

        diesel::insert_into(wishlist_lines::table)
            .values(&NewWishlistLineRow {
                account_id,
                product_id,
            })
            .on_conflict((wishlist_lines::account_id, wishlist_lines::product_id))
            .do_nothing()
            .execute(&mut conn)?;
        Ok(())
    }

    fn remove_cart_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        Self::ensure_account(&mut conn, account_id)?;

        diesel::delete(
            cart_lines::table.filter(
                cart_lines::account_id
                    .eq(account_id)
                    .and(cart_lines::product_id.eq(product_id)),
            ),
        )
        .execute(&mut conn)?;
        Ok(())
    }

    fn remove_wishlist_line(&self, account_id: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        Self::ensure_account(&mut conn, account_id)?;

        diesel::delete(
            wishlist_lines::table.filter(
                wishlist_lines::account_id
                    .eq(account_id)
                    .and(wishlist_lines::product_id.eq(product_id)),
            ),
        )
        .execute(&mut conn)?;
        Ok(())
    }

    fn clear_cart(&self, account_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        Self::ensure_account(&mut conn, account_id)?;

        diesel::delete(cart_lines::table.filter(cart_lines::account_id.eq(account_id)))
            .execute(&mut conn)?;
        Ok(())
    }
}
