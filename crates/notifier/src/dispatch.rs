//! Fan-out delivery.
//!
//! One task per destination chat, all joined before the report is built.
//! Each task hands its result back through its join handle, so no state is
//! shared between them.

use std::sync::Arc;

use tokio::task::JoinHandle;

use courier_common::error::AppError;
use courier_common::types::Message;

use crate::error::NotifierError;
use crate::sender::{MessageSender, ParseMode};

/// A destination that could not be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub chat_id: i64,
    pub error: String,
}

/// Outcome of a fan-out send. Both lists follow the order of the chat IDs
/// in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<i64>,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages joined with newlines, or `None` if every send
    /// succeeded.
    pub fn error_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(|f| f.error.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self.error_summary() {
            Some(summary) => Err(AppError::Delivery(summary)),
            None => Ok(()),
        }
    }
}

/// Sends one message to many chats concurrently.
#[derive(Clone)]
pub struct Dispatcher {
    sender: Arc<dyn MessageSender>,
}

impl Dispatcher {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }

    /// Render the Markdown text sent to every chat: the title in bold above
    /// the body, or the body alone when there is no title.
    pub fn format_text(title: Option<&str>, body: &str) -> String {
        match title {
            Some(title) if !title.is_empty() => format!("*{}*\n\n{}", title, body),
            _ => body.to_string(),
        }
    }

    pub async fn send_message(&self, message: &Message) -> DeliveryReport {
        self.send_notification(message.title(), &message.message, &message.chats)
            .await
    }

    /// Send `body` (with optional `title`) to every chat in `chats` and wait
    /// for all of them.
    pub async fn send_notification(
        &self,
        title: Option<&str>,
        body: &str,
        chats: &[i64],
    ) -> DeliveryReport {
        let text: Arc<str> = Self::format_text(title, body).into();

        tracing::debug!(chats = chats.len(), "Sending notifications");

        let handles: Vec<(i64, JoinHandle<Result<(), NotifierError>>)> = chats
            .iter()
            .map(|&chat_id| {
                let sender = Arc::clone(&self.sender);
                let text = Arc::clone(&text);
                let handle = tokio::spawn(async move {
                    tracing::debug!(chat_id, text = %text, "Sending message");
                    sender
                        .send_message(chat_id, &text, ParseMode::Markdown)
                        .await
                });
                (chat_id, handle)
            })
            .collect();

        let mut report = DeliveryReport::default();

        for (chat_id, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(NotifierError::TaskFailed {
                    chat_id,
                    reason: join_err.to_string(),
                }),
            };

            match result {
                Ok(()) => report.delivered.push(chat_id),
                Err(e) => {
                    tracing::debug!(chat_id, error = %e, "Error when sending message");
                    report.failures.push(DeliveryFailure {
                        chat_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        if !report.is_success() {
            tracing::warn!(
                delivered = report.delivered.len(),
                failed = report.failures.len(),
                "Some notifications could not be delivered"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use teloxide::ApiError;

    /// Records every call and fails for the configured chats.
    #[derive(Default)]
    struct FakeSender {
        calls: Mutex<Vec<(i64, String, ParseMode)>>,
        failing: Vec<(i64, ApiError)>,
    }

    #[async_trait]
    impl MessageSender for FakeSender {
        async fn send_message(
            &self,
            chat_id: i64,
            text: &str,
            parse_mode: ParseMode,
        ) -> Result<(), NotifierError> {
            self.calls
                .lock()
                .unwrap()
                .push((chat_id, text.to_string(), parse_mode));
            match self.failing.iter().find(|(id, _)| *id == chat_id) {
                Some((_, api_err)) => Err(NotifierError::Api(api_err.clone())),
                None => Ok(()),
            }
        }
    }

    fn slow_error(chat_id: i64) -> ApiError {
        ApiError::Unknown(format!("failed {}", chat_id))
    }

    /// Answers in reverse order of chat ID so completion order differs from
    /// request order.
    struct SlowSender;

    #[async_trait]
    impl MessageSender for SlowSender {
        async fn send_message(
            &self,
            chat_id: i64,
            _text: &str,
            _parse_mode: ParseMode,
        ) -> Result<(), NotifierError> {
            tokio::time::sleep(Duration::from_millis((10 - chat_id as u64) * 5)).await;
            Err(NotifierError::Api(slow_error(chat_id)))
        }
    }

    struct PanickingSender;

    #[async_trait]
    impl MessageSender for PanickingSender {
        async fn send_message(
            &self,
            chat_id: i64,
            _text: &str,
            _parse_mode: ParseMode,
        ) -> Result<(), NotifierError> {
            if chat_id == 2 {
                panic!("sender blew up");
            }
            Ok(())
        }
    }

    #[test]
    fn test_format_text_with_title() {
        assert_eq!(
            Dispatcher::format_text(Some("Build"), "passed"),
            "*Build*\n\npassed"
        );
    }

    #[test]
    fn test_format_text_without_title() {
        assert_eq!(Dispatcher::format_text(None, "passed"), "passed");
        assert_eq!(Dispatcher::format_text(Some(""), "passed"), "passed");
    }

    #[tokio::test]
    async fn test_sends_once_per_chat() {
        let sender = Arc::new(FakeSender::default());
        let dispatcher = Dispatcher::new(sender.clone());

        let report = dispatcher
            .send_notification(Some("Deploy"), "done", &[1, 2, 3])
            .await;

        assert!(report.is_success());
        assert_eq!(report.delivered, vec![1, 2, 3]);

        let calls = sender.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        let mut ids: Vec<i64> = calls.iter().map(|(id, _, _)| *id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
        for (_, text, mode) in calls.iter() {
            assert_eq!(text, "*Deploy*\n\ndone");
            assert_eq!(*mode, ParseMode::Markdown);
        }
    }

    #[tokio::test]
    async fn test_duplicate_chats_are_sent_twice() {
        let sender = Arc::new(FakeSender::default());
        let dispatcher = Dispatcher::new(sender.clone());

        let report = dispatcher.send_notification(None, "hi", &[5, 5]).await;

        assert_eq!(report.delivered, vec![5, 5]);
        assert_eq!(sender.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_chat_list_is_success() {
        let sender = Arc::new(FakeSender::default());
        let dispatcher = Dispatcher::new(sender.clone());

        let report = dispatcher.send_notification(None, "hi", &[]).await;

        assert!(report.is_success());
        assert!(report.error_summary().is_none());
        assert!(sender.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_aggregated() {
        let sender = Arc::new(FakeSender {
            failing: vec![(2, ApiError::ChatNotFound), (4, ApiError::BotBlocked)],
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(sender);

        let report = dispatcher.send_notification(None, "hi", &[1, 2, 3, 4]).await;

        assert!(!report.is_success());
        assert_eq!(report.delivered, vec![1, 3]);
        let expected = format!("{}\n{}", ApiError::ChatNotFound, ApiError::BotBlocked);
        assert_eq!(report.error_summary().unwrap(), expected);

        match report.into_result() {
            Err(AppError::Delivery(body)) => assert_eq!(body, expected),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_order_follows_request_order() {
        let dispatcher = Dispatcher::new(Arc::new(SlowSender));

        let report = dispatcher.send_notification(None, "hi", &[1, 5, 9]).await;

        let ids: Vec<i64> = report.failures.iter().map(|f| f.chat_id).collect();
        assert_eq!(ids, vec![1, 5, 9]);
        let expected = [1, 5, 9]
            .iter()
            .map(|&id| slow_error(id).to_string())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(report.error_summary().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_panicking_send_is_reported_as_failure() {
        let dispatcher = Dispatcher::new(Arc::new(PanickingSender));

        let report = dispatcher.send_notification(None, "hi", &[1, 2, 3]).await;

        assert_eq!(report.delivered, vec![1, 3]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].chat_id, 2);
        assert!(report.failures[0].error.contains("chat 2"));
    }

    #[tokio::test]
    async fn test_send_message_uses_message_fields() {
        let sender = Arc::new(FakeSender::default());
        let dispatcher = Dispatcher::new(sender.clone());
        let message = Message {
            title: Some(String::new()),
            message: "plain".to_string(),
            chats: vec![42],
        };

        let report = dispatcher.send_message(&message).await;

        assert!(report.is_success());
        let calls = sender.calls.lock().unwrap();
        assert_eq!(calls[0].0, 42);
        assert_eq!(calls[0].1, "plain");
    }
}
