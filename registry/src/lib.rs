use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    health::HealthCheckRepositoryImpl, inventory::InventoryLedgerImpl, lesson::LessonRepositoryImpl,
    order::OrderRepositoryImpl,
};
use kernel::repository::{
    health::HealthCheckRepository, inventory::InventoryLedger, lesson::LessonRepository,
    order::OrderRepository,
};
use kernel::service::order_intake::OrderIntake;

/// Holds every persistence handle behind its kernel trait. Constructed
/// once at startup and threaded into handlers as axum state; no
/// component reaches for ambient globals.
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    lesson_repository: Arc<dyn LessonRepository>,
    order_repository: Arc<dyn OrderRepository>,
    inventory_ledger: Arc<dyn InventoryLedger>,
    order_intake: Arc<OrderIntake>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let lesson_repository = Arc::new(LessonRepositoryImpl::new(pool.clone()));
        let order_repository = Arc::new(OrderRepositoryImpl::new(pool.clone()));
        let inventory_ledger = Arc::new(InventoryLedgerImpl::new(pool.clone()));
        let order_intake = Arc::new(OrderIntake::new(
            inventory_ledger.clone() as Arc<dyn InventoryLedger>,
            order_repository.clone() as Arc<dyn OrderRepository>,
        ));
        Self {
            health_check_repository,
            lesson_repository,
            order_repository,
            inventory_ledger,
            order_intake,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn lesson_repository(&self) -> Arc<dyn LessonRepository> {
        self.lesson_repository.clone()
    }

    pub fn order_repository(&self) -> Arc<dyn OrderRepository> {
        self.order_repository.clone()
    }

    pub fn inventory_ledger(&self) -> Arc<dyn InventoryLedger> {
        self.inventory_ledger.clone()
    }

    pub fn order_intake(&self) -> Arc<OrderIntake> {
        self.order_intake.clone()
    }
}
