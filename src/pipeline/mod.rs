//! Pipeline orchestrator for the page reader.
//!
//! This module wires image normalization, OCR, language routing, Braille
//! transliteration and speech synthesis into one request, and exposes the
//! shared state a presentation layer reads.
//!
//! # Architecture
//!
//! ```text
//! PipelineRequest (mpsc)          or          process(bytes).await
//!        │                                            │
//!        ▼                                            ▼
//! PipelineOrchestrator::run()  ─────────────▶  PipelineOrchestrator::process()
//!                                                     │
//!                  ├─ spawn_blocking(Normalizer::normalize)  → Normalizing
//!                  ├─ spawn_blocking(OcrEngine::recognize)   → Recognizing
//!                  ├─ LanguageRouter::route
//!                  │  + Transliterator::transliterate        → Transliterating
//!                  └─ SpeechSynthesizer::synthesize          → Synthesizing
//!                                                     │
//!                                                     ▼
//!                                      PipelineOutput  → Done
//!
//! SharedState (Arc<Mutex<AppState>>) ←── stage, last output, last error
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use braille_reader::config::AppConfig;
//! use braille_reader::language::ScriptDetector;
//! use braille_reader::ocr::{resolve_secondary, TesseractEngine};
//! use braille_reader::pipeline::{new_shared_state, PipelineOrchestrator, PipelineRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let state = new_shared_state(config.clone());
//!
//!     let orchestrator = PipelineOrchestrator::new(
//!         state.clone(),
//!         Arc::new(TesseractEngine::from_config(&config.ocr)),
//!         Arc::new(ScriptDetector),
//!         None,
//!         resolve_secondary(&config.ocr),
//!     );
//!
//!     let (tx, rx) = mpsc::channel(8);
//!     let worker = tokio::spawn(orchestrator.run(rx));
//!
//!     tx.send(PipelineRequest::Process(std::fs::read("page.png").unwrap())).await.unwrap();
//!     drop(tx);
//!     worker.await.unwrap();
//!
//!     if let Some(out) = &state.lock().unwrap().last_output {
//!         println!("{}", out.braille);
//!     };
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineError, PipelineOrchestrator, PipelineOutput, PipelineRequest};
pub use state::{new_shared_state, AppState, PipelineState, SharedState};
