use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{CancelOutcome, NewOrderRecord, OrderView, PaymentStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

fn order_from_row(row: OrderRow) -> Result<OrderView, DomainError> {
    let shipping_address = serde_json::from_value(row.shipping_address)
        .map_err(|e| DomainError::Internal(format!("corrupt address snapshot: {e}")))?;
    let products = serde_json::from_value(row.product_snapshots)
        .map_err(|e| DomainError::Internal(format!("corrupt product snapshots: {e}")))?;
    let payment_status = PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
        DomainError::Internal(format!("unknown payment status {:?}", row.payment_status))
    })?;

    Ok(OrderView {
        id: row.id,
        account_id: row.account_id,
        shipping_address,
        products,
        placed_at: row.placed_at,
        payment_method: row.payment_method,
        payment_status,
        delivered: row.delivered,
        order_status: row.order_status,
        total_price: row.total_price,
    })
}

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, record: NewOrderRecord) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        let shipping_address = serde_json::to_value(&record.shipping_address)
            .map_err(|e| DomainError::Internal(format!("address snapshot encoding: {e}")))?;
        let product_snapshots = serde_json::to_value(&record.products)
            .map_err(|e| DomainError::Internal(format!("product snapshot encoding: {e}")))?;

        let row: OrderRow = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: Uuid::new_v4(),
                account_id: record.account_id,
                shipping_address,
                product_snapshots,
                payment_method: record.payment_method,
                payment_status: PaymentStatus::Pending.as_str().to_string(),
                total_price: record.total_price,
            })
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;

        order_from_row(row)
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::placed_at.desc())
            .load(&mut conn)?;

        rows.into_iter().map(order_from_row).collect()
    }

    fn cancel(&self, account_id: Uuid, order_id: Uuid) -> Result<CancelOutcome, DomainError> {
        let mut conn = self.pool.get()?;

        // Guarded single statement: only a pending, undelivered order owned
        // by this account transitions.
        let cancelled = diesel::update(
            orders::table.filter(
                orders::id
                    .eq(order_id)
                    .and(orders::account_id.eq(account_id))
                    .and(orders::payment_status.eq(PaymentStatus::Pending.as_str()))
                    .and(orders::delivered.eq(false)),
            ),
        )
        .set(orders::order_status.eq("cancelled"))
        .execute(&mut conn)?;

        if cancelled == 1 {
            return Ok(CancelOutcome::Cancelled);
        }

        let exists: bool = diesel::select(diesel::dsl::exists(
            orders::table.filter(
                orders::id
                    .eq(order_id)
                    .and(orders::account_id.eq(account_id)),
            ),
        ))
        .get_result(&mut conn)?;

        Ok(if exists {
            CancelOutcome::NotCancellable
        } else {
            CancelOutcome::NotFound
        })
    }
}
