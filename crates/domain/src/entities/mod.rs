//! Domain entities

mod chat_message;
mod screening;

pub use chat_message::{ChatMessage, MessageRole};
pub use screening::{ALERT_THRESHOLD, Classification, Fallback, FallbackReason, Screening};
