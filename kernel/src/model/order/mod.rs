pub mod event;

use chrono::{DateTime, Utc};

use crate::model::id::{LessonId, OrderId};

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub lesson_id: LessonId,
    pub quantity: i32,
}
