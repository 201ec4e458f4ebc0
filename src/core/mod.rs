pub mod dataset;
pub mod dispatcher;
pub mod engine;
pub mod normalizer;
pub mod pipeline;

pub use crate::domain::model::{
    Contact, DispatchStats, MessageReceipt, SentStatus, TemplateMessage,
};
pub use crate::domain::ports::{Campaign, ConfigProvider, MessageSender, Storage};
pub use crate::utils::error::Result;
