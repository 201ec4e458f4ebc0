use crate::core::Campaign;
use crate::utils::error::Result;

pub struct BlastEngine<P: Campaign> {
    pipeline: P,
}

impl<P: Campaign> BlastEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 prepare → dispatch → persist
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting campaign run");

        let contacts = self.pipeline.prepare().await?;
        tracing::info!("📋 Prepared {} contacts", contacts.len());

        let (updated, stats) = self.pipeline.dispatch(contacts).await?;
        tracing::info!(
            "📨 Dispatch complete: {} sent, {} failed, {} skipped",
            stats.sent,
            stats.failed,
            stats.skipped
        );

        let output_path = self.pipeline.persist(&updated).await?;
        tracing::info!("💾 Updated dataset saved to: {}", output_path);

        Ok(output_path)
    }
}
