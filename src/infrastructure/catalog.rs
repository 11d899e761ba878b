use std::collections::HashMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::ProductSnapshot;
use crate::domain::ports::CatalogLookup;
use crate::schema::products;

use super::models::ProductRow;

pub struct DieselCatalog {
    pool: DbPool,
}

impl DieselCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogLookup for DieselCatalog {
    fn resolve_all(&self, product_ids: &[Uuid]) -> Result<Vec<ProductSnapshot>, DomainError> {
        let mut conn = self.pool.get()?;

        // One set-based query resolves the whole batch; the request order is
        // restored afterwards.
        let rows = products::table
            .filter(products::id.eq_any(product_ids))
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        let by_id: HashMap<Uuid, ProductRow> = rows.into_iter().map(|r| (r.id, r)).collect();

        product_ids
            .iter()
            .map(|id| {
                let row = by_id.get(id).ok_or(DomainError::NotFound("product"))?;
                Ok(ProductSnapshot {
                    id: row.id,
                    name: row.name.clone(),
                    price: row.price.clone(),
                    description: row.description.clone(),
                })
            })
            .collect()
    }
}
