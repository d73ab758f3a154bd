//! Speech synthesis collaborator.
//!
//! This module provides:
//! * [`SpeechSynthesizer`]: async trait the pipeline calls with text and a
//!   language code.
//! * [`GoogleTts`]: Google Translate TTS client producing MP3 bytes.
//! * [`chunk_text`]: whitespace-aware splitting into request-sized pieces.
//! * [`SpeechError`]: error variants for synthesis.
//!
//! The pipeline never inspects the audio it gets back.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use braille_reader::config::SpeechConfig;
//! use braille_reader::speech::{GoogleTts, SpeechSynthesizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tts = GoogleTts::from_config(&SpeechConfig::default());
//!     let mp3 = tts.synthesize("नमस्ते", "hi").await.unwrap();
//!     std::fs::write("hello.mp3", mp3).unwrap();
//! }
//! ```

pub mod chunk;
pub mod google;

use async_trait::async_trait;
use thiserror::Error;

pub use chunk::{chunk_text, MAX_CHUNK_CHARS};
pub use google::GoogleTts;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SpeechError {
    /// There is nothing to speak.
    #[error("no text to synthesize")]
    EmptyText,

    /// HTTP transport or connection error.
    #[error("speech request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("speech service returned HTTP {0}")]
    Status(u16),

    /// The service answered successfully with an empty body.
    #[error("speech service returned no audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Turns text in `language` (ISO-639-1) into encoded audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;

    fn name(&self) -> &str;
}
