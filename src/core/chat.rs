use crate::core::fraud::FraudHeuristicDetector;
use crate::core::prompt::{build_prompt, DEFAULT_HISTORY_LIMIT, SYSTEM_PROMPT};
use crate::domain::model::{ChatReply, Message};
use crate::domain::ports::LanguageModel;
use crate::utils::error::{FinmateError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Handles one user turn: fraud check, prompt assembly, model call.
/// Only one request may be outstanding at a time.
pub struct ChatService<M: LanguageModel> {
    model: M,
    detector: FraudHeuristicDetector,
    system_prompt: String,
    history_limit: usize,
    busy: AtomicBool,
}

// Clears the busy flag on every exit path, including early returns and errors.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<M: LanguageModel> ChatService<M> {
    pub fn new(model: M, detector: FraudHeuristicDetector) -> Self {
        Self {
            model,
            detector,
            system_prompt: SYSTEM_PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn detector(&self) -> &FraudHeuristicDetector {
        &self.detector
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn respond(&self, message: &str, history: &[Message]) -> Result<ChatReply> {
        if message.trim().is_empty() {
            return Err(FinmateError::EmptyMessage);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejected message while another request is in flight");
            return Err(FinmateError::RequestInFlight);
        }
        let _guard = InFlight(&self.busy);

        let fraud_alert = self.detector.detect(message);
        if fraud_alert {
            tracing::info!(
                matches = ?self.detector.matched_keywords(message),
                "Fraud keywords detected in user message"
            );
        }

        let prompt = build_prompt(&self.system_prompt, history, message, self.history_limit);
        tracing::debug!(
            message_len = message.len(),
            history_len = history.len().min(self.history_limit),
            prompt_len = prompt.len(),
            "Sending prompt to model"
        );

        let reply = self.model.generate(&prompt).await?;
        tracing::debug!(reply_len = reply.len(), "Received model reply");

        Ok(ChatReply { reply, fraud_alert })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Clone, Default)]
    struct RecordingModel {
        prompts: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(FinmateError::ModelError {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok("Here is some advice.".to_string())
        }
    }

    struct BlockingModel {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl LanguageModel for BlockingModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("done".to_string())
        }
    }

    #[tokio::test]
    async fn test_reply_carries_fraud_flag() {
        let model = RecordingModel::default();
        let service = ChatService::new(model.clone(), FraudHeuristicDetector::default());

        let flagged = service
            .respond("Someone asked for my bank account number", &[])
            .await
            .unwrap();
        assert!(flagged.fraud_alert);
        assert_eq!(flagged.reply, "Here is some advice.");

        let clean = service.respond("How do I build credit?", &[]).await.unwrap();
        assert!(!clean.fraud_alert);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].ends_with("User: How do I build credit?"));
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_before_model_call() {
        let model = RecordingModel::default();
        let service = ChatService::new(model.clone(), FraudHeuristicDetector::default());

        let err = service.respond("   ", &[]).await.unwrap_err();
        assert!(matches!(err, FinmateError::EmptyMessage));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_system_prompt_is_used() {
        let model = RecordingModel::default();
        let service = ChatService::new(model.clone(), FraudHeuristicDetector::default())
            .with_system_prompt("Be brief.")
            .with_history_limit(2);

        service.respond("Hi", &[]).await.unwrap();
        assert!(model.prompts.lock().unwrap()[0].starts_with("Be brief.\n\n"));
    }

    #[tokio::test]
    async fn test_busy_flag_released_after_error() {
        let model = RecordingModel {
            fail: true,
            ..Default::default()
        };
        let service = ChatService::new(model, FraudHeuristicDetector::default());

        let err = service.respond("hello", &[]).await.unwrap_err();
        assert!(matches!(err, FinmateError::ModelError { status: 500, .. }));
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_second_request_rejected_while_in_flight() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let service = Arc::new(ChatService::new(
            BlockingModel {
                started: started.clone(),
                release: release.clone(),
            },
            FraudHeuristicDetector::default(),
        ));

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.respond("first", &[]).await })
        };
        started.notified().await;
        assert!(service.is_busy());

        let err = service.respond("second", &[]).await.unwrap_err();
        assert!(matches!(err, FinmateError::RequestInFlight));

        release.notify_one();
        let reply = first.await.unwrap().unwrap();
        assert_eq!(reply.reply, "done");
        assert!(!service.is_busy());
    }
}
