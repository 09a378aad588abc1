pub mod lesson;
pub mod order;
