//! Command-line front end.
//!
//! `generate` writes one-shot exports, `watch` reads input lines from stdin
//! and regenerates after each quiet period, `sizes` and `settings` report
//! what is available.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use qr_studio_lib::app::SharedState;
use qr_studio_lib::services::device::DeviceHints;
use qr_studio_lib::services::feedback::NoticeKind;
use qr_studio_lib::services::{ExportFormat, TargetSize};

#[derive(Parser)]
#[command(name = "qr-studio")]
#[command(about = "Generate QR codes and export them as PNG, SVG or PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// User agent used to pick the default size
    #[arg(long, global = true, env = "QR_STUDIO_USER_AGENT", default_value = "")]
    user_agent: String,

    /// Viewport width in CSS pixels
    #[arg(long, global = true)]
    viewport_width: Option<u32>,

    /// Number of touch points the device reports
    #[arg(long, global = true, default_value = "0")]
    touch_points: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a QR code and write it out
    Generate {
        /// Text or URL to encode
        text: String,

        /// Edge length in pixels (128, 256, 512, 1024)
        #[arg(long, short = 's', value_parser = parse_size)]
        size: Option<TargetSize>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value = "png")]
        format: FormatArg,

        /// Output directory
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Print a data: URL instead of writing a file
        #[arg(long)]
        data_url: bool,
    },
    /// Read input lines from stdin and regenerate after each pause
    ///
    /// Lines starting with ':' are commands: :png, :svg, :pdf, :clear,
    /// :size N, :reload
    Watch {
        /// Initial edge length in pixels
        #[arg(long, short = 's', value_parser = parse_size)]
        size: Option<TargetSize>,

        /// Output directory
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// List supported sizes and the default for this device
    Sizes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show resolved settings as JSON
    Settings,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
    Pdf,
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Png => vec![ExportFormat::Png],
            FormatArg::Svg => vec![ExportFormat::Svg],
            FormatArg::Pdf => vec![ExportFormat::Pdf],
            FormatArg::All => ExportFormat::ALL.to_vec(),
        }
    }
}

fn parse_size(s: &str) -> Result<TargetSize, String> {
    let px: u32 = s.parse().map_err(|e| format!("{s}: {e}"))?;
    TargetSize::new(px).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let hints = DeviceHints {
        user_agent: cli.user_agent.clone(),
        viewport_width: cli.viewport_width,
        touch_points: cli.touch_points,
    };

    match cli.command {
        Commands::Generate {
            text,
            size,
            format,
            out,
            data_url,
        } => run_generate(&hints, &text, size, format, out, data_url).await,
        Commands::Watch { size, out } => run_watch(&hints, size, out).await,
        Commands::Sizes { json } => run_sizes(&hints, json),
        Commands::Settings => {
            let (_, sm) = qr_studio_lib::init_foundation(&[])?;
            println!("{}", serde_json::to_string_pretty(&sm.get_all_settings())?);
            Ok(())
        }
    }
}

fn out_override(out: Option<PathBuf>) -> Vec<(&'static str, String)> {
    out.map(|dir| vec![("OUTPUT_DIR", dir.display().to_string())])
        .unwrap_or_default()
}

async fn run_generate(
    hints: &DeviceHints,
    text: &str,
    size: Option<TargetSize>,
    format: FormatArg,
    out: Option<PathBuf>,
    data_url: bool,
) -> Result<()> {
    let (config, _) = qr_studio_lib::init_foundation(&out_override(out))?;
    let size = size.unwrap_or_else(|| config.initial_size(hints));
    let state = SharedState::new(config, size);

    state.generate(text, Some(size)).await?;
    for format in format.formats() {
        if data_url {
            let file = state.export_file(format).await?;
            println!("{}", file.to_data_url());
        } else {
            let path = state.export(format).await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn run_watch(
    hints: &DeviceHints,
    size: Option<TargetSize>,
    out: Option<PathBuf>,
) -> Result<()> {
    let overrides = out_override(out);
    let (config, _) = qr_studio_lib::init_foundation(&overrides)?;
    let size = size.unwrap_or_else(|| config.initial_size(hints));
    let state = SharedState::new(config, size);

    let mut notices = state.subscribe_notices();
    let printer = tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => {
                    let mark = match notice.kind {
                        NoticeKind::Success => "ok",
                        NoticeKind::Error => "error",
                    };
                    eprintln!("[{mark}] {}", notice.message);
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(
        size = size.get(),
        output_dir = %state.output_dir().await.display(),
        "Watching stdin. Press Ctrl+C to stop."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                handle_line(&state, &line, &overrides).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    // Let a pending input finish before exiting.
    if state.input_pending() {
        tracing::info!("Waiting for pending input");
    }
    state.flush_input().await;
    printer.abort();
    Ok(())
}

async fn handle_line(state: &SharedState, line: &str, overrides: &[(&str, String)]) {
    let Some(command) = line.strip_prefix(':') else {
        state.on_input(line);
        return;
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("png"), None) => export(state, ExportFormat::Png).await,
        (Some("svg"), None) => export(state, ExportFormat::Svg).await,
        (Some("pdf"), None) => export(state, ExportFormat::Pdf).await,
        (Some("clear"), None) => state.clear().await,
        (Some("reload"), None) => {
            let reloaded = match qr_studio_lib::bootstrap::settings_with_overrides(overrides) {
                Ok(sm) => state.reload_config(&sm).await,
                Err(e) => Err(e),
            };
            if let Err(e) = reloaded {
                eprintln!("[error] Failed to reload settings: {e}");
            }
        }
        (Some("size"), Some(value)) => match parse_size(value) {
            Ok(size) => {
                // Failures are reported as notices.
                let _ = state.set_size(size).await;
            }
            Err(e) => eprintln!("[error] {e}"),
        },
        _ => eprintln!("[error] Unknown command: {line}"),
    }
}

async fn export(state: &SharedState, format: ExportFormat) {
    if let Ok(path) = state.export(format).await {
        println!("{}", path.display());
    }
}

fn run_sizes(hints: &DeviceHints, json: bool) -> Result<()> {
    let (config, _) = qr_studio_lib::init_foundation(&[])?;
    let default = config.initial_size(hints);
    if json {
        let sizes: Vec<u32> = TargetSize::all().map(TargetSize::get).collect();
        let body = serde_json::json!({ "sizes": sizes, "default": default.get() });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for size in TargetSize::all() {
            let mark = if size == default { " (default)" } else { "" };
            println!("{size}{mark}");
        }
    }
    Ok(())
}
