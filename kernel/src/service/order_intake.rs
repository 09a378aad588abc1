use std::sync::Arc;

use derive_new::new;
use shared::error::AppResult;

use crate::model::{id::OrderId, order::event::CreateOrder, order::OrderItem};
use crate::repository::{inventory::InventoryLedger, order::OrderRepository};

/// Drives order creation: reserve capacity for each item, then insert
/// the order. The store operations for decrementing N lessons and
/// inserting one order are not a single multi-document transaction, so
/// any failure after a partial reservation triggers a compensating
/// rollback of exactly the items reserved so far.
#[derive(new)]
pub struct OrderIntake {
    ledger: Arc<dyn InventoryLedger>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderIntake {
    pub async fn create_order(&self, event: CreateOrder) -> AppResult<OrderId> {
        let mut reserved: Vec<OrderItem> = Vec::with_capacity(event.items.len());

        for item in &event.items {
            match self.ledger.reserve(item.lesson_id, item.quantity).await {
                Ok(delta) => {
                    tracing::debug!(
                        lesson_id = %delta.lesson_id,
                        quantity = delta.quantity,
                        spaces_before = delta.spaces_before,
                        spaces_after = delta.spaces_after,
                        "reserved lesson spaces"
                    );
                    reserved.push(*item);
                }
                Err(err) => {
                    self.release_reserved(&reserved).await;
                    return Err(err);
                }
            }
        }

        match self.orders.create(event).await {
            Ok(order_id) => Ok(order_id),
            Err(err) => {
                self.release_reserved(&reserved).await;
                Err(err)
            }
        }
    }

    /// Gives back every reservation made for a failed order, most
    /// recent first. A release failure must not mask the original
    /// error, so it is logged and the remaining items are still
    /// attempted.
    async fn release_reserved(&self, reserved: &[OrderItem]) {
        for item in reserved.iter().rev() {
            if let Err(err) = self.ledger.release(item.lesson_id, item.quantity).await {
                tracing::error!(
                    lesson_id = %item.lesson_id,
                    quantity = item.quantity,
                    error.cause_chain = ?err,
                    "failed to release reserved spaces during rollback"
                );
            }
        }
    }
}

impl std::fmt::Debug for OrderIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderIntake").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::LessonId;
    use crate::model::lesson::SpacesReserved;
    use crate::model::order::Order;
    use async_trait::async_trait;
    use shared::error::AppError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory ledger with the same contract as the store-backed
    /// one: the check and the decrement happen under a single lock,
    /// mirroring the atomicity of the conditional update.
    #[derive(Default)]
    struct InMemoryLedger {
        spaces: Mutex<HashMap<LessonId, i32>>,
    }

    impl InMemoryLedger {
        fn with_lesson(lesson_id: LessonId, spaces: i32) -> Self {
            let ledger = Self::default();
            ledger.spaces.lock().unwrap().insert(lesson_id, spaces);
            ledger
        }

        fn add_lesson(&self, lesson_id: LessonId, spaces: i32) {
            self.spaces.lock().unwrap().insert(lesson_id, spaces);
        }

        fn spaces_of(&self, lesson_id: LessonId) -> i32 {
            *self.spaces.lock().unwrap().get(&lesson_id).unwrap()
        }
    }

    #[async_trait]
    impl InventoryLedger for InMemoryLedger {
        async fn reserve(&self, lesson_id: LessonId, quantity: i32) -> AppResult<SpacesReserved> {
            let mut spaces = self.spaces.lock().unwrap();
            let Some(available) = spaces.get_mut(&lesson_id) else {
                return Err(AppError::EntityNotFound(format!(
                    "lesson {lesson_id} not found"
                )));
            };
            if *available < quantity {
                return Err(AppError::InsufficientSpaces {
                    lesson_id: lesson_id.to_string(),
                    requested: quantity,
                    available: *available,
                });
            }
            let before = *available;
            *available -= quantity;
            Ok(SpacesReserved {
                lesson_id,
                quantity,
                spaces_before: before,
                spaces_after: before - quantity,
            })
        }

        async fn release(&self, lesson_id: LessonId, quantity: i32) -> AppResult<()> {
            if let Some(available) = self.spaces.lock().unwrap().get_mut(&lesson_id) {
                *available += quantity;
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryOrders {
        orders: Mutex<Vec<Order>>,
        fail_next_insert: AtomicBool,
    }

    #[async_trait]
    impl OrderRepository for InMemoryOrders {
        async fn create(&self, event: CreateOrder) -> AppResult<OrderId> {
            if self.fail_next_insert.load(Ordering::SeqCst) {
                return Err(AppError::SpecificOperationError(sqlx::Error::PoolTimedOut));
            }
            let order_id = OrderId::new();
            self.orders.lock().unwrap().push(Order {
                id: order_id,
                customer_name: event.customer_name,
                customer_phone: event.customer_phone,
                customer_email: event.customer_email,
                items: event.items,
                created_at: chrono::Utc::now(),
            });
            Ok(order_id)
        }

        async fn find_all(&self) -> AppResult<Vec<Order>> {
            Ok(self.orders.lock().unwrap().clone())
        }
    }

    fn order_for(items: Vec<OrderItem>) -> CreateOrder {
        CreateOrder::new(
            "Jane Doe".into(),
            "0123456789".into(),
            "jane@example.com".into(),
            items,
        )
    }

    #[tokio::test]
    async fn creates_order_and_decrements_spaces() {
        let lesson_id = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(lesson_id, 5));
        let orders = Arc::new(InMemoryOrders::default());
        let intake = OrderIntake::new(ledger.clone(), orders.clone());

        let res = intake
            .create_order(order_for(vec![OrderItem {
                lesson_id,
                quantity: 2,
            }]))
            .await;

        assert!(res.is_ok());
        assert_eq!(ledger.spaces_of(lesson_id), 3);
        assert_eq!(orders.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_item_rolls_back_reserved_prefix() {
        let first = LessonId::new();
        let second = LessonId::new();
        let third = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(first, 4));
        ledger.add_lesson(second, 1);
        ledger.add_lesson(third, 4);
        let orders = Arc::new(InMemoryOrders::default());
        let intake = OrderIntake::new(ledger.clone(), orders.clone());

        // Item 2 asks for more than lesson `second` has left.
        let res = intake
            .create_order(order_for(vec![
                OrderItem {
                    lesson_id: first,
                    quantity: 2,
                },
                OrderItem {
                    lesson_id: second,
                    quantity: 3,
                },
                OrderItem {
                    lesson_id: third,
                    quantity: 1,
                },
            ]))
            .await;

        assert!(matches!(res, Err(AppError::InsufficientSpaces { .. })));
        assert_eq!(ledger.spaces_of(first), 4);
        assert_eq!(ledger.spaces_of(second), 1);
        assert_eq!(ledger.spaces_of(third), 4);
        assert!(orders.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_lesson_fails_order_and_compensates() {
        let known = LessonId::new();
        let unknown = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(known, 2));
        let orders = Arc::new(InMemoryOrders::default());
        let intake = OrderIntake::new(ledger.clone(), orders.clone());

        let res = intake
            .create_order(order_for(vec![
                OrderItem {
                    lesson_id: known,
                    quantity: 1,
                },
                OrderItem {
                    lesson_id: unknown,
                    quantity: 1,
                },
            ]))
            .await;

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert_eq!(ledger.spaces_of(known), 2);
    }

    #[tokio::test]
    async fn failed_insert_releases_all_reservations() {
        let lesson_id = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(lesson_id, 5));
        let orders = Arc::new(InMemoryOrders::default());
        orders.fail_next_insert.store(true, Ordering::SeqCst);
        let intake = OrderIntake::new(ledger.clone(), orders.clone());

        let res = intake
            .create_order(order_for(vec![OrderItem {
                lesson_id,
                quantity: 4,
            }]))
            .await;

        assert!(matches!(res, Err(AppError::SpecificOperationError(_))));
        assert_eq!(ledger.spaces_of(lesson_id), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_orders_never_oversell() {
        let lesson_id = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(lesson_id, 4));
        let orders = Arc::new(InMemoryOrders::default());
        let intake = Arc::new(OrderIntake::new(
            ledger.clone() as Arc<dyn InventoryLedger>,
            orders.clone() as Arc<dyn OrderRepository>,
        ));

        // Eight concurrent orders of 2 against 4 spaces: exactly two
        // may succeed.
        let mut handles = Vec::new();
        for _ in 0..8 {
            let intake = intake.clone();
            handles.push(tokio::spawn(async move {
                intake
                    .create_order(
                        CreateOrder::new(
                            "Racer".into(),
                            "0000000000".into(),
                            "racer@example.com".into(),
                            vec![OrderItem {
                                lesson_id,
                                quantity: 2,
                            }],
                        ),
                    )
                    .await
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 2);
        assert_eq!(ledger.spaces_of(lesson_id), 0);
        assert_eq!(orders.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn retrying_a_failed_reserve_does_not_double_decrement() {
        let lesson_id = LessonId::new();
        let ledger = Arc::new(InMemoryLedger::with_lesson(lesson_id, 1));

        for _ in 0..3 {
            let res = ledger.reserve(lesson_id, 2).await;
            assert!(matches!(res, Err(AppError::InsufficientSpaces { .. })));
        }
        assert_eq!(ledger.spaces_of(lesson_id), 1);
    }
}
