//! The `nutrion analyze` command: one photo in, one nutrition breakdown out.

use clap::Args;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use nutrion_core::config::UploadConfig;
use nutrion_core::{mime_type_for, AnalysisResult, Config, Nutrion, Settings, Upload};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Meal photo to analyze (jpg, jpeg or png)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Mime type to declare for the photo (inferred from the filename if omitted)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Gemini model to use instead of `gemini.model`
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write the response to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    // No key, no requests: this is the startup check.
    let settings = Settings::from_config(config, args.model.as_deref())?;
    let nutrion = Nutrion::new(settings);

    ensure_supported(&args.image, &config.upload, args.mime_type.is_some())?;

    let upload = Upload::from_path(&args.image, args.mime_type.clone())?;
    eprintln!("  {}", preview_line(&upload));

    let text = analyze_with_spinner(&nutrion, &upload).await?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, format!("{text}\n"))?;
            tracing::info!("Response written to {:?}", path);
        }
        None => print_response(&text),
    }

    Ok(())
}

/// Refuse files the upload control wouldn't accept.
///
/// An explicit `--mime-type` skips the extension check.
pub(crate) fn ensure_supported(
    path: &Path,
    upload: &UploadConfig,
    mime_declared: bool,
) -> anyhow::Result<()> {
    if mime_declared {
        return Ok(());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !upload.accepts(&name) {
        anyhow::bail!(
            "Unsupported file type: {}\n\n  Hint: choose a {} image.",
            path.display(),
            upload.supported_formats.join(", ")
        );
    }
    Ok(())
}

/// One-line summary of an upload: name, size and the mime type it will be sent as.
pub(crate) fn preview_line(upload: &Upload) -> String {
    format!(
        "{} · {} · {}",
        upload.filename,
        human_size(upload.len()),
        mime_type_for(upload)
    )
}

fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Run the analysis while a spinner ticks on stderr.
pub(crate) async fn analyze_with_spinner(
    nutrion: &Nutrion,
    upload: &Upload,
) -> AnalysisResult<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!(
        "Asking {} about your meal...",
        nutrion.settings().model()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = nutrion.analyze(Some(upload)).await;
    spinner.finish_and_clear();
    result
}

const RESPONSE_HEADER: &str = "The Response is";

/// The model's answer under the result header.
fn render_response(text: &str, header: &Style) -> String {
    format!("{}\n\n{text}", header.apply_to(RESPONSE_HEADER))
}

/// Print the model's answer under a bold result header.
pub(crate) fn print_response(text: &str) {
    println!("{}", render_response(text, &Style::new().bold()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_supported_accepts_default_formats() {
        let cfg = UploadConfig::default();
        assert!(ensure_supported(Path::new("/tmp/lunch.JPG"), &cfg, false).is_ok());
        assert!(ensure_supported(Path::new("plate.png"), &cfg, false).is_ok());
    }

    #[test]
    fn ensure_supported_rejects_other_extensions() {
        let cfg = UploadConfig::default();
        let err = ensure_supported(Path::new("lunch.gif"), &cfg, false).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
        assert!(err.to_string().contains("jpg, jpeg, png"));
    }

    #[test]
    fn ensure_supported_skips_check_with_declared_mime() {
        let cfg = UploadConfig::default();
        assert!(ensure_supported(Path::new("lunch.heic"), &cfg, true).is_ok());
    }

    #[test]
    fn preview_line_shows_inferred_mime() {
        let upload = Upload::new(vec![0; 2048], "salad.png", None);
        assert_eq!(preview_line(&upload), "salad.png · 2.0 KB · image/png");
    }

    #[test]
    fn preview_line_prefers_declared_mime() {
        let upload = Upload::new(vec![0; 10], "salad", Some("image/webp".to_string()));
        assert_eq!(preview_line(&upload), "salad · 10 B · image/webp");
    }

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn render_response_puts_header_first() {
        let rendered = render_response("Apple - 95 cal", &Style::new());
        assert_eq!(rendered, "The Response is\n\nApple - 95 cal");
    }

    fn mock_config(server: &mockito::Server) -> Config {
        let mut config = Config::default();
        config.gemini.api_key = "test-key".to_string();
        config.gemini.endpoint = server.url();
        config
    }

    fn meal_photo(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("lunch.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F']).unwrap();
        path
    }

    fn args_for(image: PathBuf, output: Option<PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            image,
            mime_type: None,
            model: None,
            output,
        }
    }

    #[tokio::test]
    async fn execute_writes_trimmed_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "candidates": [
                        { "content": { "parts": [ { "text": "  Apple - 95 cal\nTotal - 95 cal \n" } ] } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("answer.txt");
        let args = args_for(meal_photo(&dir), Some(out.clone()));

        execute(args, &mock_config(&server)).await.unwrap();

        mock.assert_async().await;
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "Apple - 95 cal\nTotal - 95 cal\n");
    }

    #[tokio::test]
    async fn execute_reports_invalid_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT",
                        "details": [ { "reason": "API_KEY_INVALID" } ]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("answer.txt");
        let args = args_for(meal_photo(&dir), Some(out.clone()));

        let err = execute(args, &mock_config(&server)).await.unwrap_err();

        assert_eq!(
            crate::error_line(&err),
            "Error: API key invalid. Re-check the key in your .env or generate a new one in Google AI Studio."
        );
        assert_eq!(crate::report(Err(err)), std::process::ExitCode::FAILURE);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn execute_rejects_malformed_model_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(meal_photo(&dir), None);
        args.model = Some("models/".to_string());

        let mut config = Config::default();
        config.gemini.api_key = "test-key".to_string();
        config.gemini.endpoint = "http://127.0.0.1:1".to_string();

        let err = execute(args, &config).await.unwrap_err();
        assert!(crate::error_line(&err).starts_with("Error: Invalid configuration"));
    }

    #[test]
    fn analyze_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AnalyzeArgs,
        }

        let w = Wrapper::parse_from(["nutrion", "meal.jpg", "--model", "gemini-1.5-pro"]);
        assert_eq!(w.args.image, PathBuf::from("meal.jpg"));
        assert_eq!(w.args.model.as_deref(), Some("gemini-1.5-pro"));
        assert!(w.args.mime_type.is_none());
        assert!(w.args.output.is_none());
    }
}
