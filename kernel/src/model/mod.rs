pub mod id;
pub mod lesson;
pub mod order;
