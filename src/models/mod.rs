pub mod command;
pub mod hand;
