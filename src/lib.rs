pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{storage::LocalStorage, twilio::TwilioSender};
pub use config::{campaign::CampaignConfig, CliArgs};
pub use core::{engine::BlastEngine, pipeline::CampaignPipeline};
pub use utils::error::{BlastError, Result};
