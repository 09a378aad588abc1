pub mod order_intake;
