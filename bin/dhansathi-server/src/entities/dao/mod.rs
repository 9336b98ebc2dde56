pub mod chat;
pub mod tutorial;

pub use chat::ChatRecord;
pub use tutorial::{TutorialFields, TutorialRecord};
