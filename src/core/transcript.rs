use crate::domain::model::{ChatExport, Conversation, ExportedMessage, Message, Role};
use crate::utils::error::{FinmateError, Result};
use chrono::{Local, TimeZone, Utc};

pub const NEW_CHAT_TITLE: &str = "New Chat";
pub const UNTITLED_CHAT_TITLE: &str = "Untitled Chat";
const TITLE_MAX_CHARS: usize = 50;

/// First 50 characters of the message, with "..." when it was cut.
pub fn title_from_message(content: &str) -> String {
    let trimmed = content.trim();
    let mut title: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

fn display_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => millis.to_string(),
    }
}

/// In-memory list of conversations, newest first, plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct ConversationBook {
    conversations: Vec<Conversation>,
    current_id: Option<String>,
    next_seq: u64,
}

impl ConversationBook {
    /// Restores saved conversations and selects the first one.
    pub fn from_conversations(conversations: Vec<Conversation>) -> Self {
        let current_id = conversations.first().map(|c| c.id.clone());
        Self {
            conversations,
            current_id,
            next_seq: 0,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current_id.as_deref().and_then(|id| self.get(id).ok())
    }

    pub fn get(&self, id: &str) -> Result<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| FinmateError::ConversationNotFound { id: id.to_string() })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FinmateError::ConversationNotFound { id: id.to_string() })
    }

    fn next_id(&mut self) -> String {
        self.next_seq += 1;
        format!("{}-{}", Utc::now().timestamp_millis(), self.next_seq)
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        self.get(id)?;
        self.current_id = Some(id.to_string());
        Ok(())
    }

    pub fn create_chat(&mut self) -> String {
        self.insert_chat(NEW_CHAT_TITLE.to_string())
    }

    fn insert_chat(&mut self, title: String) -> String {
        let id = self.next_id();
        self.conversations.insert(
            0,
            Conversation {
                id: id.clone(),
                title,
                messages: Vec::new(),
                created_at: Utc::now().timestamp_millis(),
            },
        );
        self.current_id = Some(id.clone());
        id
    }

    fn new_message(&mut self, role: Role, content: &str) -> Message {
        Message {
            id: self.next_id(),
            content: content.trim().to_string(),
            role,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Records a user turn in the current chat, creating one if none is selected.
    /// Returns `(chat_id, message_id)`.
    pub fn push_user_message(&mut self, content: &str) -> Result<(String, String)> {
        let chat_id = match self.current_id.clone() {
            Some(id) if self.get(&id).is_ok() => id,
            _ => self.insert_chat(title_from_message(content)),
        };

        let message = self.new_message(Role::User, content);
        let message_id = message.id.clone();

        let chat = self.get_mut(&chat_id)?;
        if chat.messages.is_empty() {
            chat.title = title_from_message(&message.content);
        }
        chat.messages.push(message);

        Ok((chat_id, message_id))
    }

    pub fn push_assistant_message(&mut self, chat_id: &str, content: &str) -> Result<String> {
        self.get(chat_id)?;
        let message = Message {
            id: self.next_id(),
            content: content.to_string(),
            role: Role::Assistant,
            timestamp: Utc::now().timestamp_millis(),
        };
        let message_id = message.id.clone();
        self.get_mut(chat_id)?.messages.push(message);
        Ok(message_id)
    }

    /// Drops a message that was recorded before its exchange failed.
    pub fn rollback(&mut self, chat_id: &str, message_id: &str) -> Result<()> {
        let chat = self.get_mut(chat_id)?;
        let before = chat.messages.len();
        chat.messages.retain(|m| m.id != message_id);
        if chat.messages.len() == before {
            return Err(FinmateError::MessageNotFound {
                id: message_id.to_string(),
            });
        }
        Ok(())
    }

    /// Deletes a message from the current chat. A user message takes the
    /// assistant reply right after it along with it.
    pub fn delete_message(&mut self, message_id: &str) -> Result<()> {
        let chat_id = self
            .current_id
            .clone()
            .ok_or_else(|| FinmateError::MessageNotFound {
                id: message_id.to_string(),
            })?;
        let chat = self.get_mut(&chat_id)?;
        let index = chat
            .messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(|| FinmateError::MessageNotFound {
                id: message_id.to_string(),
            })?;

        let takes_reply = chat.messages[index].role == Role::User
            && chat
                .messages
                .get(index + 1)
                .is_some_and(|next| next.role == Role::Assistant);
        let end = if takes_reply { index + 2 } else { index + 1 };
        chat.messages.drain(index..end);
        Ok(())
    }

    pub fn edit_message(&mut self, message_id: &str, content: &str) -> Result<()> {
        let chat_id = self
            .current_id
            .clone()
            .ok_or_else(|| FinmateError::MessageNotFound {
                id: message_id.to_string(),
            })?;
        let message = self
            .get_mut(&chat_id)?
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| FinmateError::MessageNotFound {
                id: message_id.to_string(),
            })?;
        message.content = content.trim().to_string();
        Ok(())
    }

    pub fn rename(&mut self, chat_id: &str, title: &str) -> Result<()> {
        let title = title.trim();
        self.get_mut(chat_id)?.title = if title.is_empty() {
            UNTITLED_CHAT_TITLE.to_string()
        } else {
            title.to_string()
        };
        Ok(())
    }

    pub fn delete_chat(&mut self, chat_id: &str) -> Result<()> {
        self.get(chat_id)?;
        self.conversations.retain(|c| c.id != chat_id);
        if self.current_id.as_deref() == Some(chat_id) {
            self.current_id = self.conversations.first().map(|c| c.id.clone());
        }
        Ok(())
    }

    pub fn export(&self, chat_id: &str) -> Result<ChatExport> {
        let chat = self.get(chat_id)?;
        Ok(ChatExport {
            title: chat.title.clone(),
            created_at: display_time(chat.created_at),
            messages: chat
                .messages
                .iter()
                .map(|m| ExportedMessage {
                    role: m.role,
                    content: m.content.clone(),
                    timestamp: display_time(m.timestamp),
                })
                .collect(),
        })
    }
}
