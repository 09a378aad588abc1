use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    id::OrderId,
    order::{event::CreateOrder, Order},
};
use kernel::repository::order::OrderRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::order::{fold_rows, OrderItemRow},
    ConnectionPool,
};

#[derive(new)]
pub struct OrderRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create(&self, event: CreateOrder) -> AppResult<OrderId> {
        let order_id = OrderId::new();
        let created_at = Utc::now();

        let mut tx = self.db.begin().await?;

        let res = sqlx::query(
            r#"
                INSERT INTO orders
                (order_id, customer_name, customer_phone, customer_email, created_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(&event.customer_name)
        .bind(&event.customer_phone)
        .bind(&event.customer_email)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no order record has been created".into(),
            ));
        }

        // item_index preserves submission order for read-back.
        for (item_index, item) in event.items.iter().enumerate() {
            sqlx::query(
                r#"
                    INSERT INTO order_items (order_id, item_index, lesson_id, quantity)
                    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item_index as i32)
            .bind(item.lesson_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(order_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Order>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
                SELECT
                    o.order_id,
                    o.customer_name,
                    o.customer_phone,
                    o.customer_email,
                    o.created_at,
                    i.lesson_id,
                    i.quantity
                FROM orders AS o
                INNER JOIN order_items AS i ON i.order_id = o.order_id
                ORDER BY o.created_at ASC, o.order_id ASC, i.item_index ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(fold_rows(rows))
    }
}
