//! Pipeline stage machine and shared application state.
//!
//! [`PipelineState`] tracks which stage the orchestrator is in.  A
//! presentation layer reads it, along with the last [`PipelineOutput`],
//! through [`SharedState`].
//!
//! [`SharedState`] is an `Arc<Mutex<AppState>>`: cheap to clone and safe to
//! share across threads.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;

use super::runner::PipelineOutput;

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// Stages of one image → text → Braille → speech run.
///
/// ```text
/// Idle ──request──▶ Normalizing ──▶ Recognizing ──▶ Transliterating
///                                                      │
///                          speech enabled, text found  ▼
///                                                 Synthesizing ──▶ Done
///                               otherwise ─────────────────────▶ Done
/// Normalizing / Recognizing ──failure──▶ Error
/// Done / Error ──next request──▶ Normalizing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No request in flight.
    #[default]
    Idle,

    /// Decoding, resizing and (in Enhanced mode) binarizing the image.
    Normalizing,

    /// The OCR engine is running on the blocking thread pool.
    Recognizing,

    /// Routing the recognised text and converting it to Braille.
    Transliterating,

    /// Waiting on the speech synthesizer.
    Synthesizing,

    /// All outputs are ready in [`AppState::last_output`].
    Done,

    /// The request failed; see [`AppState::error_message`].
    Error,
}

impl PipelineState {
    /// Returns `true` while a request is being processed.
    ///
    /// ```
    /// use braille_reader::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Normalizing.is_busy());
    /// assert!(PipelineState::Recognizing.is_busy());
    /// assert!(PipelineState::Transliterating.is_busy());
    /// assert!(PipelineState::Synthesizing.is_busy());
    /// assert!(!PipelineState::Done.is_busy());
    /// assert!(!PipelineState::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Normalizing
                | PipelineState::Recognizing
                | PipelineState::Transliterating
                | PipelineState::Synthesizing
        )
    }

    /// Short status label.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Normalizing => "Preparing image",
            PipelineState::Recognizing => "Reading text",
            PipelineState::Transliterating => "Converting to Braille",
            PipelineState::Synthesizing => "Generating speech",
            PipelineState::Done => "Done",
            PipelineState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything a presentation layer needs between requests.
pub struct AppState {
    /// Current pipeline stage.
    pub pipeline: PipelineState,

    /// Outputs of the most recent successful request.
    pub last_output: Option<PipelineOutput>,

    /// Configuration the orchestrator was built from.
    pub config: AppConfig,

    /// Set when `pipeline == PipelineState::Error`.
    pub error_message: Option<String>,

    /// Number of requests that reached `Done`.
    pub completed: u64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            pipeline: PipelineState::Idle,
            last_output: None,
            config,
            error_message: None,
            completed: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].  Do not hold the lock across `.await`.
pub type SharedState = Arc<Mutex<AppState>>;

pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_processing_stages_are_busy() {
        let busy = [
            PipelineState::Normalizing,
            PipelineState::Recognizing,
            PipelineState::Transliterating,
            PipelineState::Synthesizing,
        ];
        let idle = [PipelineState::Idle, PipelineState::Done, PipelineState::Error];

        assert!(busy.iter().all(PipelineState::is_busy));
        assert!(!idle.iter().any(PipelineState::is_busy));
    }

    #[test]
    fn labels_are_distinct() {
        let all = [
            PipelineState::Idle,
            PipelineState::Normalizing,
            PipelineState::Recognizing,
            PipelineState::Transliterating,
            PipelineState::Synthesizing,
            PipelineState::Done,
            PipelineState::Error,
        ];
        let mut labels: Vec<_> = all.iter().map(PipelineState::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), all.len());
    }

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    #[test]
    fn app_state_starts_empty() {
        let state = AppState::default();
        assert_eq!(state.pipeline, PipelineState::Idle);
        assert!(state.last_output.is_none());
        assert!(state.error_message.is_none());
        assert_eq!(state.completed, 0);
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        state.lock().unwrap().pipeline = PipelineState::Recognizing;
        assert_eq!(state2.lock().unwrap().pipeline, PipelineState::Recognizing);
    }
}
