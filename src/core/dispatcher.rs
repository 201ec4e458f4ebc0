use crate::domain::model::{Contact, DispatchStats, SentStatus, TemplateMessage};
use crate::domain::ports::MessageSender;
use std::collections::HashMap;
use std::time::Duration;

/// 發送迴圈的跳過策略、節流與模板參數
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub allow_repeat: bool,
    pub pause: Duration,
    pub template_sid: String,
    pub media_urls: Vec<String>,
}

/// Runs the send loop over the dataset, strictly in source order, one record
/// at a time. Returns a new contact sequence with updated statuses plus the
/// run counters; a per-record failure never aborts the loop.
pub async fn run_dispatch<M: MessageSender>(
    sender: &M,
    contacts: Vec<Contact>,
    options: &DispatchOptions,
) -> (Vec<Contact>, DispatchStats) {
    let mut updated = Vec::with_capacity(contacts.len());
    let mut stats = DispatchStats::default();

    for contact in contacts {
        // SENT 記錄只在不允許重發時跳過；FAILED 永遠重試
        if !options.allow_repeat && contact.status == SentStatus::Sent {
            tracing::info!(
                "⏭️ Skipping {} ({}) - already sent",
                contact.name,
                contact.company
            );
            stats.skipped += 1;
            updated.push(contact);
            continue;
        }

        let message = TemplateMessage {
            to: contact.number.clone(),
            template_sid: options.template_sid.clone(),
            variables: HashMap::from([("1".to_string(), contact.name.clone())]),
            media_urls: options.media_urls.clone(),
        };

        let status = match sender.send_template(&message).await {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Sent to {} at {} (SID: {})",
                    contact.name,
                    contact.number,
                    receipt.sid
                );
                stats.sent += 1;
                SentStatus::Sent
            }
            Err(e) => {
                tracing::error!("❌ Failed for {} at {}: {}", contact.name, contact.number, e);
                stats.failed += 1;
                SentStatus::Failed
            }
        };

        updated.push(Contact { status, ..contact });

        // 每次嘗試後固定暫停，避開供應商的隱性速率限制
        tokio::time::sleep(options.pause).await;
    }

    (updated, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MessageReceipt;
    use crate::utils::error::{BlastError, Result};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Instant;
    use tokio::sync::Mutex;

    enum Scripted {
        Accept(&'static str),
        Reject(&'static str),
    }

    struct MockSender {
        script: Mutex<VecDeque<Scripted>>,
        calls: Mutex<Vec<TemplateMessage>>,
    }

    impl MockSender {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        async fn calls(&self) -> Vec<TemplateMessage> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl MessageSender for MockSender {
        async fn send_template(&self, message: &TemplateMessage) -> Result<MessageReceipt> {
            self.calls.lock().await.push(message.clone());
            match self.script.lock().await.pop_front() {
                Some(Scripted::Accept(sid)) => Ok(MessageReceipt {
                    sid: sid.to_string(),
                    status: Some("queued".to_string()),
                }),
                Some(Scripted::Reject(detail)) => Err(BlastError::ProviderError {
                    status: 400,
                    detail: detail.to_string(),
                }),
                None => panic!("send_template called more times than scripted"),
            }
        }
    }

    fn contact(name: &str, number: &str, status: SentStatus) -> Contact {
        Contact {
            name: name.to_string(),
            company: "Acme".to_string(),
            number: number.to_string(),
            status,
        }
    }

    fn options(allow_repeat: bool) -> DispatchOptions {
        DispatchOptions {
            allow_repeat,
            pause: Duration::ZERO,
            template_sid: "HXtest".to_string(),
            media_urls: vec!["https://example.com/sample.pdf".to_string()],
        }
    }

    #[tokio::test]
    async fn test_sent_record_skipped_when_repeat_disallowed() {
        let sender = MockSender::new(vec![Scripted::Accept("SM1"), Scripted::Accept("SM2")]);
        let contacts = vec![
            contact("A", "+911111111111", SentStatus::Unsent),
            contact("B", "+912222222222", SentStatus::Sent),
            contact("C", "+913333333333", SentStatus::Unsent),
        ];

        let (updated, stats) = run_dispatch(&sender, contacts, &options(false)).await;

        let calls = sender.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].to, "+911111111111");
        assert_eq!(calls[1].to, "+913333333333");

        assert_eq!(updated[0].status, SentStatus::Sent);
        assert_eq!(updated[1], contact("B", "+912222222222", SentStatus::Sent));
        assert_eq!(updated[2].status, SentStatus::Sent);

        assert_eq!(stats.sent, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_sent_record_reattempted_when_repeat_allowed() {
        let sender = MockSender::new(vec![Scripted::Reject("template rejected")]);
        let contacts = vec![contact("A", "+911111111111", SentStatus::Sent)];

        let (updated, stats) = run_dispatch(&sender, contacts, &options(true)).await;

        assert_eq!(sender.calls().await.len(), 1);
        // 新結果覆寫舊狀態
        assert_eq!(updated[0].status, SentStatus::Failed);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 0);
    }

    #[tokio::test]
    async fn test_failed_record_always_reattempted() {
        let sender = MockSender::new(vec![Scripted::Accept("SM1")]);
        let contacts = vec![contact("A", "+911111111111", SentStatus::Failed)];

        let (updated, stats) = run_dispatch(&sender, contacts, &options(false)).await;

        assert_eq!(sender.calls().await.len(), 1);
        assert_eq!(updated[0].status, SentStatus::Sent);
        assert_eq!(stats.sent, 1);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_the_run() {
        let sender = MockSender::new(vec![
            Scripted::Reject("invalid number"),
            Scripted::Accept("SM2"),
        ]);
        let contacts = vec![
            contact("B", "+911234567890", SentStatus::Unsent),
            contact("C", "+919876543210", SentStatus::Unsent),
        ];

        let (updated, stats) = run_dispatch(&sender, contacts, &options(false)).await;

        assert_eq!(sender.calls().await.len(), 2);
        assert_eq!(updated[0].status, SentStatus::Failed);
        assert_eq!(updated[1].status, SentStatus::Sent);
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_template_message_carries_name_variable_and_media() {
        let sender = MockSender::new(vec![Scripted::Accept("SM1")]);
        let contacts = vec![contact("Anurag", "+919810890461", SentStatus::Unsent)];

        run_dispatch(&sender, contacts, &options(false)).await;

        let calls = sender.calls().await;
        assert_eq!(calls[0].template_sid, "HXtest");
        assert_eq!(calls[0].variables.get("1").unwrap(), "Anurag");
        assert_eq!(calls[0].media_urls, vec!["https://example.com/sample.pdf"]);
    }

    #[tokio::test]
    async fn test_attempts_are_separated_by_the_configured_pause() {
        let sender = MockSender::new(vec![Scripted::Accept("SM1"), Scripted::Accept("SM2")]);
        let contacts = vec![
            contact("A", "+911111111111", SentStatus::Unsent),
            contact("B", "+912222222222", SentStatus::Unsent),
        ];
        let mut opts = options(false);
        opts.pause = Duration::from_millis(25);

        let started = Instant::now();
        run_dispatch(&sender, contacts, &opts).await;

        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_skipped_record_incurs_no_pause() {
        let sender = MockSender::new(vec![]);
        let contacts = vec![contact("A", "+911111111111", SentStatus::Sent)];
        let mut opts = options(false);
        opts.pause = Duration::from_secs(2);

        let started = Instant::now();
        let (_, stats) = run_dispatch(&sender, contacts, &opts).await;

        assert_eq!(stats.skipped, 1);
        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
