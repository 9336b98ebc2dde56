//! Business logic that sits between the HTTP routes and the stores.

pub mod chat;

pub use chat::{ChatError, ChatOptions, ChatService, ProbeOutcome, TurnRequest};
