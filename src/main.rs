use anyhow::Context;
use clap::Parser;
use cloudflare_cli::app::setup::run_setup;
use cloudflare_cli::config::resolver;
use cloudflare_cli::utils::{logger, validation::Validate};
use cloudflare_cli::{CliConfig, CliError, CloudflareClient, Menu, Prompter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("Starting cloudflare-cli");

    let mut prompt = Prompter::new(std::io::stdin().lock(), std::io::stdout());
    let mut config = resolver::resolve();

    if args.configure || !config.has_token() {
        let wanted = args.configure
            || match prompt.confirm("No API token configured. Set one up now?", true) {
                Ok(answer) => answer,
                Err(CliError::InputClosed) => return Ok(()),
                Err(e) => return Err(e.into()),
            };

        if wanted {
            let path = resolver::global_config_path()
                .context("Could not determine the home directory")?;
            match run_setup(&mut prompt, &config.api_base, &path) {
                Ok(_) => config = resolver::resolve(),
                Err(CliError::InputClosed) => return Ok(()),
                Err(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                }
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::warn!("Configured API base looks wrong: {}", e);
        eprintln!("⚠️  {}", e.user_friendly_message());
    }
    tracing::debug!(
        "Using API base {} (token {})",
        config.api_base,
        if config.has_token() { "present" } else { "absent" }
    );

    let client = CloudflareClient::new(config);
    let mut menu = Menu::new(&client, prompt);
    menu.run().await?;

    Ok(())
}
