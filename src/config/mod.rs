pub mod resolver;

pub use resolver::{Configuration, ConfigSources, DEFAULT_API_BASE};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cloudflare-cli")]
#[command(about = "Interactive manager for Cloudflare zones and DNS records")]
pub struct CliConfig {
    #[arg(long, help = "Run the token setup before opening the menu")]
    pub configure: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}
