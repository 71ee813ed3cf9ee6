//! Interactive CLI mode: guided experience for bare `nutrion` invocation.
//!
//! When `nutrion` is invoked with no subcommand on a TTY, this module offers
//! a small menu. The analysis flow uses the same core calls as
//! `nutrion analyze`; a failed request is shown and the menu comes back.

pub mod analyze;
pub mod theme;

use console::Style;
use dialoguer::Select;
use nutrion_core::{Config, Nutrion, Settings};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Use this to wrap `interact_text()` / `interact()` calls that lack an `_opt`
/// variant, so interrupts exit the current flow cleanly instead of panicking.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Main menu options presented to the user.
const MENU_ITEMS: &[&str] = &["Analyze a meal photo", "View configuration", "Exit"];

/// Entry point for interactive mode.
///
/// The credential is resolved before the menu is shown; without it the
/// session never starts.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let settings = Settings::from_config(config, None)?;
    let nutrion = Nutrion::new(settings);

    theme::print_banner();
    let theme = theme::nutrion_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => analyze::guided_analyze(&nutrion, config).await?,
            Some(1) => show_config(config, nutrion.settings())?,
            Some(2) | None => break, // Exit or Ctrl+C / Esc
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Interactive config viewer. Shows a summary of current settings, with the
/// option to show the full TOML or the config file path.
fn show_config(config: &Config, settings: &Settings) -> anyhow::Result<()> {
    let theme = theme::nutrion_theme();
    let dim = Style::new().for_stderr().dim();
    let green = Style::new().for_stderr().green();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", green.apply_to("Current configuration:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Model:"),
            settings.model()
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Endpoint:"),
            settings.endpoint()
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("API key:"),
            key_source(config)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Accepted files:"),
            config.upload.supported_formats.join(", ")
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Log level:"),
            config.logging.level
        );
        eprintln!();

        let items = &["View full config (TOML)", "Show config file path", "Back"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Configuration")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => match crate::cli::config::redacted(config).to_toml() {
                Ok(toml) => {
                    eprintln!();
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!("{toml}");
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!();
                }
                Err(e) => {
                    let err = Style::new().for_stderr().red();
                    eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                    eprintln!();
                }
            },
            Some(1) => {
                eprintln!();
                eprintln!("  {}", Config::default_path().display());
                eprintln!();
            }
            Some(2) | None => break, // Back or Esc / Ctrl+C
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Describe where the API key came from, without revealing it.
fn key_source(config: &Config) -> String {
    let key = config.gemini.api_key.trim();
    if key.starts_with("${") {
        format!("config ({key})")
    } else if !key.is_empty() {
        "config file".to_string()
    } else {
        format!(
            "environment ({})",
            nutrion_core::config::CREDENTIAL_ENV_VARS.join(" or ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_source_environment() {
        let config = Config::default();
        assert_eq!(key_source(&config), "environment (GOOGLE_API_KEY or API_KEY)");
    }

    #[test]
    fn key_source_never_prints_literal_key() {
        let mut config = Config::default();
        config.gemini.api_key = "AIza-secret".to_string();
        assert_eq!(key_source(&config), "config file");
    }

    #[test]
    fn key_source_shows_reference() {
        let mut config = Config::default();
        config.gemini.api_key = "${MY_KEY}".to_string();
        assert_eq!(key_source(&config), "config (${MY_KEY})");
    }

    #[test]
    fn handle_interrupt_maps_interrupted_to_none() {
        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        let result: anyhow::Result<Option<u8>> = handle_interrupt(Err(err));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn handle_interrupt_passes_value() {
        assert_eq!(handle_interrupt(Ok(3u8)).unwrap(), Some(3));
    }
}
