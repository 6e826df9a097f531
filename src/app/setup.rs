use crate::app::prompt::Prompter;
use crate::config::resolver::persist_to;
use crate::config::Configuration;
use crate::utils::error::{CliError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url};
use std::io::{BufRead, Write};
use std::path::Path;

/// Asks for a token and base URL, then writes them to `path`.
pub fn run_setup<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    default_base: &str,
    path: &Path,
) -> Result<Configuration> {
    prompt.say("\nCloudflare API setup")?;
    prompt.say("Create a token at https://dash.cloudflare.com/profile/api-tokens")?;

    let api_token = ask_valid(prompt, |p| {
        let token = p.text("API token")?;
        validate_non_empty_string("api_token", &token)?;
        Ok(token)
    })?;

    let api_base = ask_valid(prompt, |p| {
        let base = p.text_with_default("API base URL", default_base)?;
        validate_url("api_base", &base)?;
        Ok(base)
    })?;

    persist_to(path, &api_token, &api_base)?;
    prompt.say(format!("✅ Configuration saved to {}", path.display()))?;

    Ok(Configuration::new(api_base, Some(api_token)))
}

/// Repeats `ask` until it yields a value that passes validation.
fn ask_valid<R, W, T, F>(prompt: &mut Prompter<R, W>, mut ask: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut Prompter<R, W>) -> Result<T>,
{
    loop {
        match ask(prompt) {
            Err(e @ CliError::InvalidInput { .. }) => {
                prompt.say(format!("❌ {}", e.user_friendly_message()))?;
            }
            other => return other,
        }
    }
}
