use clap::Parser;
use wa_blast::utils::{logger, validation::Validate};
use wa_blast::{BlastEngine, CampaignConfig, CampaignPipeline, CliArgs, LocalStorage, TwilioSender};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting wa-blast CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let mut config = match CampaignConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config '{}': {}", args.config, e);
            eprintln!("❌ Failed to load config '{}': {}", args.config, e);
            std::process::exit(2);
        }
    };

    if args.allow_repeat {
        config.dispatch.allow_repeat = Some(true);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    // 組裝存儲、發送端與管道
    let storage = LocalStorage::new(config.data.data_dir.clone());
    let mut sender = TwilioSender::new(
        &config.provider.account_sid,
        &config.provider.auth_token,
        &config.provider.whatsapp_from,
    );
    if let Some(base_url) = &config.provider.api_base_url {
        sender = sender.with_base_url(base_url.clone());
    }

    let pipeline = CampaignPipeline::new(storage, config, sender);
    let engine = BlastEngine::new(pipeline);

    // 個別發送失敗已在迴圈內消化；這裡只剩致命錯誤
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Campaign run completed");
            println!("✅ Campaign run completed");
            println!("📁 Delivery status written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Campaign run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
