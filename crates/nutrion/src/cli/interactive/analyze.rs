//! Guided meal analysis.
//!
//! Walks the user through: photo path → preview → "Tell me about my meal"
//! → result. Errors from the request are shown and the flow returns to the
//! menu.

use crate::cli::analyze::{analyze_with_spinner, preview_line, print_response};
use console::Style;
use dialoguer::{Confirm, Input};
use nutrion_core::config::UploadConfig;
use nutrion_core::{Config, Nutrion, Upload};
use std::path::PathBuf;

use super::theme::nutrion_theme;

/// Walk the user through one analysis.
pub async fn guided_analyze(nutrion: &Nutrion, config: &Config) -> anyhow::Result<()> {
    let theme = nutrion_theme();
    let warn = Style::new().for_stderr().yellow();
    let dim = Style::new().for_stderr().dim();
    let err_style = Style::new().for_stderr().red();

    // ── Step 1: Choose a photo ──────────────────────────────────────────────
    // Re-prompts until the path points at an accepted image file.

    let path = loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt(format!(
                    "Path to meal photo ({})",
                    config.upload.supported_formats.join(", ")
                ))
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        match check_photo_path(&raw_path, &config.upload) {
            Ok(path) => break path,
            Err(msg) => eprintln!("  {}", warn.apply_to(msg)),
        }
    };

    // ── Step 2: Read and preview ────────────────────────────────────────────

    let upload = match Upload::from_path(&path, None) {
        Ok(upload) => upload,
        Err(e) => {
            eprintln!("  {}", err_style.apply_to(format!("Error: {e}")));
            return Ok(());
        }
    };
    eprintln!("  {}", dim.apply_to(preview_line(&upload)));

    // ── Step 3: Submit ──────────────────────────────────────────────────────

    let submit = Confirm::with_theme(&theme)
        .with_prompt("Tell me about my meal")
        .default(true)
        .interact_opt()?;
    if submit != Some(true) {
        return Ok(());
    }

    // ── Step 4: Result ──────────────────────────────────────────────────────

    match analyze_with_spinner(nutrion, &upload).await {
        Ok(text) => {
            eprintln!();
            print_response(&text);
            eprintln!();
        }
        Err(e) => {
            eprintln!("  {}", err_style.apply_to(format!("Error: {e}")));
            eprintln!();
        }
    }

    Ok(())
}

/// Resolve a typed path (with `~` expansion) and check it is an accepted image file.
fn check_photo_path(raw: &str, upload: &UploadConfig) -> Result<PathBuf, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Please choose an image before continuing.".to_string());
    }

    let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if !path.exists() {
        return Err(format!("Path not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Not a file: {}", path.display()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !upload.accepts(&name) {
        return Err(format!(
            "Unsupported file type. Choose a {} image.",
            upload.supported_formats.join(", ")
        ));
    }

    Ok(path)
}
