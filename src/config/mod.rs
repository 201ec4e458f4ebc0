pub mod campaign;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "wa-blast")]
#[command(about = "Bulk WhatsApp template sender with per-contact delivery status")]
pub struct CliArgs {
    #[arg(long, default_value = "campaign.toml")]
    pub config: String,

    /// 對已標記 SENT 的聯絡人重發
    #[arg(long)]
    pub allow_repeat: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
