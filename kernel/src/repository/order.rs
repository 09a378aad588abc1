use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::OrderId,
    order::{event::CreateOrder, Order},
};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order with a store-assigned id and `created_at`.
    /// The header and its items are written in one transaction.
    async fn create(&self, event: CreateOrder) -> AppResult<OrderId>;
    /// Returns every stored order, items in submission order.
    async fn find_all(&self) -> AppResult<Vec<Order>>;
}
