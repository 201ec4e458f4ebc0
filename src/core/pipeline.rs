use crate::core::dataset;
use crate::core::dispatcher::{self, DispatchOptions};
use crate::core::normalizer;
use crate::core::{Campaign, ConfigProvider, Contact, DispatchStats, MessageSender, Storage};
use crate::utils::error::{BlastError, Result};
use std::time::Duration;

/// Campaign pipeline wired from injected ports: storage for the CSV
/// artifacts, config for paths and pacing, sender for the provider call.
pub struct CampaignPipeline<S: Storage, C: ConfigProvider, M: MessageSender> {
    storage: S,
    config: C,
    sender: M,
}

impl<S: Storage, C: ConfigProvider, M: MessageSender> CampaignPipeline<S, C, M> {
    pub fn new(storage: S, config: C, sender: M) -> Self {
        Self {
            storage,
            config,
            sender,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, M: MessageSender> Campaign for CampaignPipeline<S, C, M> {
    async fn prepare(&self) -> Result<Vec<Contact>> {
        match self.storage.read_file(self.config.normalized_csv()).await {
            Ok(bytes) => {
                // 既存的正規化資料集視為權威，不重新推導
                let contacts = dataset::parse_contacts(&bytes)?;
                tracing::info!(
                    "📄 Using existing normalized dataset ({} contacts)",
                    contacts.len()
                );
                Ok(contacts)
            }
            Err(BlastError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Normalized dataset missing, deriving from raw input");

                // 缺原始檔屬致命錯誤，直接往上傳
                let raw = self.storage.read_file(self.config.raw_csv()).await?;
                let rows = dataset::read_rows(&raw)?;
                let contacts =
                    normalizer::expand_contacts(rows, self.config.default_country_code());

                let bytes = dataset::write_contacts(&contacts)?;
                self.storage
                    .write_file(self.config.normalized_csv(), &bytes)
                    .await?;

                tracing::info!(
                    "📌 Normalized dataset saved to {} with {} rows",
                    self.config.normalized_csv(),
                    contacts.len()
                );
                Ok(contacts)
            }
            Err(e) => Err(e),
        }
    }

    async fn dispatch(&self, contacts: Vec<Contact>) -> Result<(Vec<Contact>, DispatchStats)> {
        let options = DispatchOptions {
            allow_repeat: self.config.allow_repeat(),
            pause: Duration::from_secs(self.config.delay_seconds()),
            template_sid: self.config.template_sid().to_string(),
            media_urls: self.config.media_urls().to_vec(),
        };

        Ok(dispatcher::run_dispatch(&self.sender, contacts, &options).await)
    }

    async fn persist(&self, contacts: &[Contact]) -> Result<String> {
        let bytes = dataset::write_contacts(contacts)?;
        self.storage
            .write_file(self.config.normalized_csv(), &bytes)
            .await?;

        Ok(format!(
            "{}/{}",
            self.config.data_dir(),
            self.config.normalized_csv()
        ))
    }
}
