use derive_new::new;

use crate::model::order::OrderItem;

/// A validated order payload, normalized into the canonical shape.
/// Contact fields are already trimmed and non-empty, quantities are
/// positive, and no lesson id repeats within `items`.
#[derive(Debug, Clone, new)]
pub struct CreateOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
}
