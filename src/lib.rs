pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::menu::Menu;
pub use app::prompt::Prompter;
pub use config::{Configuration, ConfigSources};
pub use core::{client::CloudflareClient, CloudflareApi};
pub use domain::model::{ApiResponse, DnsRecordUpdate, NewDnsRecord};
pub use utils::error::{CliError, Result};
