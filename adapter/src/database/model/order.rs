use chrono::{DateTime, Utc};
use kernel::model::{
    id::{LessonId, OrderId},
    order::{Order, OrderItem},
};

/// One row per order item, joined with its order header. Rows arrive
/// sorted by (created_at, order_id, item_index) and are folded back
/// into `Order` values by `fold_rows`.
#[derive(sqlx::FromRow)]
pub struct OrderItemRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
    pub lesson_id: LessonId,
    pub quantity: i32,
}

pub fn fold_rows(rows: Vec<OrderItemRow>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();
    for row in rows {
        match orders.last_mut() {
            Some(order) if order.id == row.order_id => {
                order.items.push(OrderItem {
                    lesson_id: row.lesson_id,
                    quantity: row.quantity,
                });
            }
            _ => {
                orders.push(Order {
                    id: row.order_id,
                    customer_name: row.customer_name,
                    customer_phone: row.customer_phone,
                    customer_email: row.customer_email,
                    items: vec![OrderItem {
                        lesson_id: row.lesson_id,
                        quantity: row.quantity,
                    }],
                    created_at: row.created_at,
                });
            }
        }
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_groups_consecutive_rows_by_order() {
        let first = OrderId::new();
        let second = OrderId::new();
        let lesson_a = LessonId::new();
        let lesson_b = LessonId::new();
        let now = Utc::now();

        let row = |order_id: OrderId, lesson_id: LessonId, quantity: i32| OrderItemRow {
            order_id,
            customer_name: "A".into(),
            customer_phone: "1".into(),
            customer_email: "a@example.com".into(),
            created_at: now,
            lesson_id,
            quantity,
        };

        let orders = fold_rows(vec![
            row(first, lesson_a, 1),
            row(first, lesson_b, 2),
            row(second, lesson_a, 3),
        ]);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[1].quantity, 2);
        assert_eq!(orders[1].items.len(), 1);
        assert_eq!(orders[1].items[0].quantity, 3);
    }
}
