use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slipstream::catalog::{Classified, classify_and_decode};
use slipstream::convert::{ConvertOptions, Converter, DEFAULT_CONCURRENCY, render_json};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slipstream")]
#[command(version)]
#[command(
    about = "Decode captured F1 2020 UDP telemetry packets.",
    long_about = None,
    after_help = "Examples:\n  slipstream convert data/1620373100 --output output\n  slipstream inspect data/1620373100/1620373100123.data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a directory of captured `.data` buffers to JSON files.
    Convert {
        /// Directory of captured buffers
        input: PathBuf,

        /// Output root; packets land in <OUTPUT>/<packet name>/
        #[arg(short = 'o', long, default_value = "output")]
        output: PathBuf,

        /// Buffers processed concurrently
        #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Decode a single captured buffer and print it as JSON.
    Inspect {
        /// Captured buffer file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert { input, output, concurrency, pretty } => {
            cmd_convert(input, output, concurrency, pretty).await
        }
        Commands::Inspect { file } => cmd_inspect(file).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn cmd_convert(
    input: PathBuf,
    output: PathBuf,
    concurrency: usize,
    pretty: bool,
) -> Result<ExitCode> {
    let options = ConvertOptions::new(output).with_concurrency(concurrency).with_pretty(pretty);
    let converter = Converter::new(options);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, finishing in-flight buffers");
            on_signal.cancel();
        }
    });

    let report = converter
        .convert_dir(&input, cancel)
        .await
        .with_context(|| format!("failed to convert {}", input.display()))?;

    for failure in &report.failed {
        warn!(buffer = %failure.name, error = %failure.error, "Not converted");
    }
    println!(
        "converted {} / unsupported {} / failed {} ({} bytes written)",
        report.converted,
        report.unsupported,
        report.failed.len(),
        report.bytes_written
    );

    Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn cmd_inspect(file: PathBuf) -> Result<ExitCode> {
    let data = tokio::fs::read(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let classified = classify_and_decode(&data)
        .with_context(|| format!("failed to decode {}", file.display()))?;
    match classified {
        Classified::Decoded(packet) => {
            let json = render_json(&packet, true)?;
            println!("{}", String::from_utf8_lossy(&json));
        }
        Classified::Unsupported { header } => {
            let name = header.packet_kind().map_or("undefined", |id| id.name());
            println!("unsupported packet id {} ({name}), {} bytes", header.packet_id, data.len());
        }
    }
    Ok(ExitCode::SUCCESS)
}
