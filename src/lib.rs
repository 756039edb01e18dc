#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::RegistryConfig;
pub use core::events::{ChannelSink, LogSink};
pub use core::pagination::{PageRequest, MAX_PAGE_SIZE};
pub use core::registry::FundraiserRegistry;
pub use domain::model::{Fundraiser, FundraiserCreated, Identity, NewFundraiser};
pub use domain::ports::EventSink;
pub use utils::error::{RegistryError, Result};
