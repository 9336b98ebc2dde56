pub mod chat;
pub mod tutorial;
