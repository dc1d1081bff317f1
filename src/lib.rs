pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use crate::adapters::{GeminiClient, LocalStorage};
pub use crate::core::amortization::{calculate, calculate_emi, LoanInputs, LoanResult};
pub use crate::core::chat::ChatService;
pub use crate::core::fraud::{contains_fraud_keyword, FraudHeuristicDetector, FraudKeywordSet};
pub use crate::core::glossary::{Glossary, GlossaryTerm};
pub use crate::core::session::ChatSession;
pub use crate::core::transcript::ConversationBook;
pub use crate::utils::error::{FinmateError, Result};
