use crate::domain::model::Conversation;
use crate::domain::ports::ConversationStore;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub const CONVERSATIONS_KEY: &str = "finmate-chats";

/// Key-value store backed by one JSON file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", key))
    }

    pub async fn read_key(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.path_for(key);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write_key(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

impl ConversationStore for LocalStorage {
    async fn load(&self) -> Result<Vec<Conversation>> {
        match self.read_key(CONVERSATIONS_KEY).await? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, conversations: &[Conversation]) -> Result<()> {
        let data = serde_json::to_vec_pretty(conversations)?;
        tracing::debug!(
            "Writing {} conversations ({} bytes) to {}",
            conversations.len(),
            data.len(),
            self.path_for(CONVERSATIONS_KEY).display()
        );
        self.write_key(CONVERSATIONS_KEY, &data).await
    }
}
