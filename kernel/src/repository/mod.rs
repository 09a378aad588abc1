pub mod health;
pub mod inventory;
pub mod lesson;
pub mod order;
