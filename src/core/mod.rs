pub mod amortization;
pub mod chat;
pub mod fraud;
pub mod glossary;
pub mod prompt;
pub mod session;
pub mod transcript;

pub use crate::domain::model::{ChatReply, Conversation, Message, Role};
pub use crate::domain::ports::{ConversationStore, LanguageModel};
pub use crate::utils::error::Result;
