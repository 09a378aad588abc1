pub mod health;
pub mod lesson;
pub mod order;
