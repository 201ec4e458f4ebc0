use crate::core::{MessageReceipt, MessageSender, TemplateMessage};
use crate::utils::error::{BlastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Twilio Messages API 的回應片段，其餘欄位忽略
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResource {
    message: Option<String>,
}

/// Sends WhatsApp template messages through the Twilio Messages API.
/// Explicitly constructed and injected; holds no global state.
pub struct TwilioSender {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSender {
    pub fn new(account_sid: &str, auth_token: &str, from: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from: from.to_string(),
        }
    }

    /// 測試時指向 mock server
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    async fn send_template(&self, message: &TemplateMessage) -> Result<MessageReceipt> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let content_variables = serde_json::to_string(&message.variables)?;

        let mut form: Vec<(&str, String)> = vec![
            ("From", self.from.clone()),
            ("To", format!("whatsapp:{}", message.to)),
            ("ContentSid", message.template_sid.clone()),
            ("ContentVariables", content_variables),
        ];
        for media_url in &message.media_urls {
            form.push(("MediaUrl", media_url.clone()));
        }

        tracing::debug!("Posting message to {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            let resource: MessageResource = response.json().await?;
            Ok(MessageReceipt {
                sid: resource.sid,
                status: resource.status,
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorResource>(&body) {
                Ok(ErrorResource { message: Some(m) }) => m,
                _ => body,
            };
            Err(BlastError::ProviderError {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
