use crate::core::chat::ChatService;
use crate::core::transcript::ConversationBook;
use crate::domain::model::ChatReply;
use crate::domain::ports::{ConversationStore, LanguageModel};
use crate::utils::error::{FinmateError, Result};

/// Ties the chat handler to the transcript and its persistence: the user turn
/// is recorded before the request and rolled back if the request fails.
pub struct ChatSession<M: LanguageModel, S: ConversationStore> {
    service: ChatService<M>,
    store: S,
    book: ConversationBook,
}

impl<M: LanguageModel, S: ConversationStore> ChatSession<M, S> {
    pub async fn open(service: ChatService<M>, store: S) -> Result<Self> {
        let conversations = store.load().await?;
        tracing::debug!("Loaded {} saved conversations", conversations.len());
        Ok(Self {
            service,
            store,
            book: ConversationBook::from_conversations(conversations),
        })
    }

    pub fn book(&self) -> &ConversationBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut ConversationBook {
        &mut self.book
    }

    pub fn service(&self) -> &ChatService<M> {
        &self.service
    }

    pub async fn persist(&self) -> Result<()> {
        self.store.save(self.book.conversations()).await
    }

    pub async fn send(&mut self, input: &str) -> Result<ChatReply> {
        let content = input.trim();
        if content.is_empty() {
            return Err(FinmateError::EmptyMessage);
        }

        // History excludes the turn being sent; the prompt appends it itself.
        let history = self
            .book
            .current()
            .map(|chat| chat.messages.clone())
            .unwrap_or_default();

        let (chat_id, message_id) = self.book.push_user_message(content)?;
        tracing::info!("Sending message in chat {}", chat_id);

        match self.service.respond(content, &history).await {
            Ok(reply) => {
                self.book.push_assistant_message(&chat_id, &reply.reply)?;
                self.persist().await?;
                if reply.fraud_alert {
                    tracing::warn!("Fraud alert raised for chat {}", chat_id);
                }
                Ok(reply)
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                self.book.rollback(&chat_id, &message_id)?;
                if let Err(save_err) = self.persist().await {
                    tracing::error!("Failed to save conversations after rollback: {}", save_err);
                }
                Err(e)
            }
        }
    }
}
