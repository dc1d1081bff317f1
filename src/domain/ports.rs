use crate::domain::model::Conversation;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConversationStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Conversation>>> + Send;
    fn save(
        &self,
        conversations: &[Conversation],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends a fully assembled prompt and returns the model's text reply.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
