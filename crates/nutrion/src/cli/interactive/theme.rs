//! Custom dialoguer theme and banner for Nutrion interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` configured with Nutrion's colours.
///
/// - Prompt prefix: green `?`
/// - Active item indicator: green `▸`
/// - Success prefix: green `✓`
/// - Error prefix: red `✗`
pub fn nutrion_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().green(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().green(),
        active_item_style: Style::new().for_stderr().green(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the Nutrion banner to stderr.
///
/// All output goes to stderr so stdout stays clean for the model's answer.
pub fn print_banner() {
    let title = format!("Nutrion App v{}", nutrion_core::VERSION);
    let tagline = "Tell me about my meal";

    let inner_width = title.len().max(tagline.len()) + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", title, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let green = Style::new().for_stderr().green();

    eprintln!();
    eprintln!("{}", green.apply_to(&top));
    eprintln!("{}", green.apply_to(&mid1));
    eprintln!("{}", green.apply_to(&mid2));
    eprintln!("{}", green.apply_to(&bot));
    eprintln!();
}
