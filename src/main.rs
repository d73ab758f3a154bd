//! Application entry point: photographed page → text, Braille and speech.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Resolve the secondary OCR pack once.
//! 4. Build the OCR engine, detector and speech synthesizer from config.
//! 5. Create the tokio runtime.
//! 6. Run one request under `request_timeout_secs`.
//! 7. Print text and Braille; write the MP3 if any.
//!
//! ```text
//! braille-reader <image> [--out <file.mp3>]
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use braille_reader::{
    config::{AppConfig, AppPaths},
    language::ScriptDetector,
    ocr::{resolve_secondary, TesseractEngine},
    pipeline::{new_shared_state, PipelineOrchestrator, PipelineOutput},
    speech::{GoogleTts, SpeechSynthesizer},
};
use clap::Parser;
use tokio::runtime::Runtime;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "braille-reader")]
#[command(about = "Read a photographed page as text, Braille and speech")]
#[command(version)]
struct Args {
    /// Image of the page to read
    image: PathBuf,

    /// Where to write the MP3 (defaults to <audio dir>/<image stem>.mp3)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// `<audio_dir>/<image stem>.mp3`
fn default_audio_path(paths: &AppPaths, image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "speech".to_string());
    paths.audio_dir.join(format!("{stem}.mp3"))
}

fn write_audio(path: &Path, audio: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, audio).with_context(|| format!("writing {}", path.display()))
}

/// Drive `request` to completion on `rt`, giving up after `timeout`.
///
/// The timer must be created inside the runtime, so the whole future is
/// built in the `async` block handed to `block_on`.
fn block_on_with_timeout<F: Future>(
    rt: &Runtime,
    timeout: Duration,
    request: F,
) -> Result<F::Output> {
    rt.block_on(async { tokio::time::timeout(timeout, request).await })
        .with_context(|| format!("timed out after {}s", timeout.as_secs()))
}

fn print_output(output: &PipelineOutput) {
    println!("── Text ({}) ──", output.language);
    if output.text.trim().is_empty() {
        println!("(no text recognised)");
    } else {
        println!("{}", output.text);
    }
    println!();
    println!("── Braille ──");
    println!("{}", output.braille);

    for notice in &output.notices {
        eprintln!("note: {notice}");
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging, default to INFO, override with RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // 2. Config
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("failed to load settings, using defaults: {e}");
        AppConfig::default()
    });
    let paths = AppPaths::new();

    // 3. Secondary OCR pack, resolved once
    let secondary_available = resolve_secondary(&config.ocr);

    // 4. Collaborators
    let speech: Option<Arc<dyn SpeechSynthesizer>> = if config.speech.enabled {
        Some(Arc::new(GoogleTts::from_config(&config.speech)))
    } else {
        log::info!("speech synthesis disabled in settings");
        None
    };

    let state = new_shared_state(config.clone());
    let orchestrator = PipelineOrchestrator::new(
        state,
        Arc::new(TesseractEngine::from_config(&config.ocr)),
        Arc::new(ScriptDetector),
        speech,
        secondary_available,
    );

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("reading {}", args.image.display()))?;

    // 5. Runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 6. One request under the request-level timeout
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let output = block_on_with_timeout(&rt, timeout, orchestrator.process(bytes))??;

    // 7. Present
    print_output(&output);

    if let Some(audio) = &output.audio {
        let path = args
            .out
            .unwrap_or_else(|| default_audio_path(&paths, &args.image));
        write_audio(&path, audio)?;
        println!();
        println!("Audio ({}): {}", output.speech_language, path.display());
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
