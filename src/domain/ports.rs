use crate::domain::model::{Contact, DispatchStats, MessageReceipt, TemplateMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn raw_csv(&self) -> &str;
    fn normalized_csv(&self) -> &str;
    fn default_country_code(&self) -> &str;
    fn allow_repeat(&self) -> bool;
    fn delay_seconds(&self) -> u64;
    fn template_sid(&self) -> &str;
    fn media_urls(&self) -> &[String];
}

/// 外部發送能力，以 handle 注入以便測試替身
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_template(&self, message: &TemplateMessage) -> Result<MessageReceipt>;
}

#[async_trait]
pub trait Campaign: Send + Sync {
    async fn prepare(&self) -> Result<Vec<Contact>>;
    async fn dispatch(&self, contacts: Vec<Contact>) -> Result<(Vec<Contact>, DispatchStats)>;
    async fn persist(&self, contacts: &[Contact]) -> Result<String>;
}
