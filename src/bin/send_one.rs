use anyhow::Context;
use clap::Parser;
use std::collections::HashMap;
use wa_blast::core::normalizer::normalize_number;
use wa_blast::core::{ConfigProvider, MessageSender, TemplateMessage};
use wa_blast::utils::validation::Validate;
use wa_blast::{CampaignConfig, TwilioSender};

/// 單發冒煙測試：用同一份配置送一則模板訊息
#[derive(Debug, Parser)]
#[command(name = "send_one")]
#[command(about = "Send a single template message to one number (sanity check)")]
struct Args {
    #[arg(long, default_value = "campaign.toml")]
    config: String,

    /// Destination number, raw or +-prefixed
    #[arg(long)]
    to: String,

    /// Recipient name used for the {{1}} template slot
    #[arg(long)]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = CampaignConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config '{}'", args.config))?;
    config.validate().context("invalid campaign config")?;

    let mut sender = TwilioSender::new(
        &config.provider.account_sid,
        &config.provider.auth_token,
        &config.provider.whatsapp_from,
    );
    if let Some(base_url) = &config.provider.api_base_url {
        sender = sender.with_base_url(base_url.clone());
    }

    let message = TemplateMessage {
        to: normalize_number(&args.to, config.default_country_code()),
        template_sid: config.provider.template_sid.clone(),
        variables: HashMap::from([("1".to_string(), args.name.clone())]),
        media_urls: config.provider.media_urls.clone(),
    };

    println!("🚀 Sending to {} ...", message.to);

    match sender.send_template(&message).await {
        Ok(receipt) => {
            println!("✅ Message sent. SID: {}", receipt.sid);
            if let Some(status) = receipt.status {
                println!("Status: {}", status);
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to send: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
