use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{LessonId, OrderId},
    order::{event::CreateOrder, Order, OrderItem},
};
use serde::{Deserialize, Serialize};

/// Checkout payload. Everything here is checked before any store
/// access; a validation failure never touches lesson capacity.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[garde(custom(not_blank))]
    pub customer_name: String,
    #[garde(custom(not_blank))]
    pub customer_phone: String,
    #[garde(email)]
    pub customer_email: String,
    #[garde(length(min = 1), custom(no_duplicate_lessons), dive)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[garde(skip)]
    pub lesson_id: LessonId,
    #[garde(range(min = 1))]
    pub quantity: i32,
}

fn not_blank(value: &str, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

// The same lesson must not appear twice in one order; silently merging
// the quantities would hide a client bug.
fn no_duplicate_lessons(items: &[OrderItemRequest], _context: &()) -> garde::Result {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.lesson_id) {
            return Err(garde::Error::new(format!(
                "lesson {} appears more than once",
                item.lesson_id
            )));
        }
    }
    Ok(())
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(value: CreateOrderRequest) -> Self {
        let CreateOrderRequest {
            customer_name,
            customer_phone,
            customer_email,
            items,
        } = value;
        CreateOrder {
            customer_name: customer_name.trim().to_owned(),
            customer_phone: customer_phone.trim().to_owned(),
            customer_email: customer_email.trim().to_owned(),
            items: items
                .into_iter()
                .map(|item| OrderItem {
                    lesson_id: item.lesson_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderResponse {
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        let Order {
            id,
            customer_name,
            customer_phone,
            customer_email,
            items,
            created_at,
        } = value;
        Self {
            id,
            customer_name,
            customer_phone,
            customer_email,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub lesson_id: LessonId,
    pub quantity: i32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        let OrderItem {
            lesson_id,
            quantity,
        } = value;
        Self {
            lesson_id,
            quantity,
        }
    }
}
