//! Pipeline orchestrator: image → OCR → language → Braille → speech.
//!
//! [`PipelineOrchestrator`] owns the stage components and publishes progress
//! into [`SharedState`].  It can be driven directly with
//! [`process`](PipelineOrchestrator::process) or by sending
//! [`PipelineRequest`]s to [`run`](PipelineOrchestrator::run).
//!
//! # Pipeline flow
//!
//! ```text
//! image bytes
//!   └─▶ spawn_blocking(normalize)                       [Normalizing]
//!         ├─ Err → PipelineError::Image                 [Error]
//!         └─▶ spawn_blocking(ocr.recognize)             [Recognizing]
//!               ├─ Err → PipelineError::Ocr             [Error]
//!               └─▶ route + transliterate               [Transliterating]
//!                     └─▶ speech.synthesize (async)     [Synthesizing]
//!                           ├─ Ok  → audio              [Done]
//!                           └─ Err → warn, no audio     [Done]
//! ```
//!
//! Per-stage failure policy:
//!
//! | Stage      | On failure                                     |
//! |------------|------------------------------------------------|
//! | Normalize  | request fails with [`PipelineError::Image`]    |
//! | OCR        | request fails with [`PipelineError::Ocr`]      |
//! | Detection  | primary language assumed (never fails)         |
//! | Braille    | unmapped input becomes spaces (never fails)    |
//! | Speech     | output has no audio and carries a notice       |
//!
//! The orchestrator imposes no timeouts; callers wrap a whole request.

use std::sync::{Arc, MutexGuard};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::braille::Transliterator;
use crate::config::AppConfig;
use crate::language::{LanguageDetector, LanguageRouter, LanguageTag};
use crate::ocr::{LanguageSet, OcrEngine, OcrError};
use crate::preprocess::{ImageError, NormalizedImage, Normalizer};
use crate::speech::SpeechSynthesizer;

use super::state::{AppState, PipelineState, SharedState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Failures that abort a request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("image rejected: {0}")]
    Image(#[from] ImageError),

    #[error("text recognition failed: {0}")]
    Ocr(#[from] OcrError),

    /// A blocking task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// PipelineOutput / PipelineRequest
// ---------------------------------------------------------------------------

/// Everything one request produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Recognised text, possibly empty.
    pub text: String,
    /// Language indicator prefix followed by the transliterated text.
    pub braille: String,
    pub language: LanguageTag,
    /// Code the speech synthesizer was (or would have been) called with.
    pub speech_language: String,
    /// The normalized image, for display.
    pub image: NormalizedImage,
    /// Encoded audio, when speech synthesis ran and succeeded.
    pub audio: Option<Vec<u8>>,
    /// Human-readable notes about degraded stages.
    pub notices: Vec<String>,
}

/// Messages accepted by [`PipelineOrchestrator::run`].
#[derive(Debug)]
pub enum PipelineRequest {
    /// Run the full pipeline on encoded image bytes.
    Process(Vec<u8>),
    /// Return to `Idle` and clear the last error.
    Reset,
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the image → text → Braille → speech pipeline.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use braille_reader::config::AppConfig;
/// use braille_reader::language::ScriptDetector;
/// use braille_reader::ocr::{resolve_secondary, TesseractEngine};
/// use braille_reader::pipeline::{new_shared_state, PipelineOrchestrator};
/// use braille_reader::speech::GoogleTts;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let secondary = resolve_secondary(&config.ocr);
/// let state = new_shared_state(config.clone());
///
/// let orchestrator = PipelineOrchestrator::new(
///     state,
///     Arc::new(TesseractEngine::from_config(&config.ocr)),
///     Arc::new(ScriptDetector),
///     Some(Arc::new(GoogleTts::from_config(&config.speech))),
///     secondary,
/// );
///
/// let output = orchestrator.process(std::fs::read("page.png").unwrap()).await.unwrap();
/// println!("{}\n{}", output.text, output.braille);
/// # }
/// ```
pub struct PipelineOrchestrator {
    state: SharedState,
    normalizer: Normalizer,
    ocr: Arc<dyn OcrEngine>,
    languages: LanguageSet,
    secondary_pack: String,
    router: LanguageRouter,
    transliterator: Arc<Transliterator>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
}

impl PipelineOrchestrator {
    /// Build an orchestrator from the config held in `state`.
    ///
    /// # Arguments
    ///
    /// * `ocr`      : OCR engine (e.g. `TesseractEngine`).
    /// * `detector` : language identification (e.g. `ScriptDetector`).
    /// * `speech`   : synthesizer; ignored when `config.speech.enabled` is off.
    /// * `secondary_available`: result of the startup pack check.
    pub fn new(
        state: SharedState,
        ocr: Arc<dyn OcrEngine>,
        detector: Arc<dyn LanguageDetector>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
        secondary_available: bool,
    ) -> Self {
        let config: AppConfig = lock(&state).config.clone();

        Self {
            normalizer: Normalizer::new(config.image.clone(), config.mode),
            ocr,
            languages: LanguageSet::from_config(&config.ocr, secondary_available),
            secondary_pack: config.ocr.secondary_pack.clone(),
            router: LanguageRouter::new(detector, &config.language),
            transliterator: Arc::new(Transliterator::standard(config.braille.cache_capacity)),
            speech: speech.filter(|_| config.speech.enabled),
            state,
        }
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn transliterator(&self) -> &Arc<Transliterator> {
        &self.transliterator
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Serve requests until `rx` is closed.
    pub async fn run(self, mut rx: mpsc::Receiver<PipelineRequest>) {
        while let Some(request) = rx.recv().await {
            match request {
                PipelineRequest::Process(bytes) => {
                    // Outcome is published to the shared state.
                    let _ = self.process(bytes).await;
                }
                PipelineRequest::Reset => {
                    let mut st = lock(&self.state);
                    st.pipeline = PipelineState::Idle;
                    st.error_message = None;
                }
            }
        }

        log::info!("pipeline: request channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // One request
    // -----------------------------------------------------------------------

    /// Run every stage on `image_bytes`.
    pub async fn process(&self, image_bytes: Vec<u8>) -> Result<PipelineOutput, PipelineError> {
        match self.run_stages(image_bytes).await {
            Ok(output) => {
                let mut st = lock(&self.state);
                st.pipeline = PipelineState::Done;
                st.error_message = None;
                st.last_output = Some(output.clone());
                st.completed += 1;
                Ok(output)
            }
            Err(e) => {
                self.set_error(&e);
                Err(e)
            }
        }
    }

    async fn run_stages(&self, image_bytes: Vec<u8>) -> Result<PipelineOutput, PipelineError> {
        let mut notices = Vec::new();

        // ── 1. Normalize (CPU-bound → thread pool) ───────────────────────
        self.set_pipeline(PipelineState::Normalizing);
        let normalizer = self.normalizer.clone();
        let image = tokio::task::spawn_blocking(move || normalizer.normalize(&image_bytes))
            .await
            .map_err(|e| PipelineError::Internal(e.to_string()))??;

        log::debug!(
            "pipeline: normalized to {:?} (binarized={})",
            image.dimensions(),
            image.is_binarized()
        );

        // ── 2. OCR (blocking → thread pool) ──────────────────────────────
        self.set_pipeline(PipelineState::Recognizing);
        if !self.languages.contains(&self.secondary_pack) {
            notices.push(format!(
                "OCR language pack '{}' is not installed; only '{}' text was recognised",
                self.secondary_pack,
                self.languages.selector()
            ));
        }

        let ocr = Arc::clone(&self.ocr);
        let languages = self.languages.clone();
        let (image, recognized) = tokio::task::spawn_blocking(move || {
            let result = ocr.recognize(&image, &languages);
            (image, result)
        })
        .await
        .map_err(|e| PipelineError::Internal(e.to_string()))?;
        let text = recognized?;

        log::debug!("pipeline: OCR returned {} chars", text.chars().count());

        // ── 3. Route + transliterate ─────────────────────────────────────
        self.set_pipeline(PipelineState::Transliterating);
        let route = self.router.route(&text);
        let body = self.transliterator.transliterate(&text);
        let braille = format!("{}{}", route.braille_prefix, body);

        log::info!(
            "pipeline: {} chars of {} text → {} Braille cells",
            text.chars().count(),
            route.tag,
            body.chars().count()
        );

        // ── 4. Speech (degrades to no audio) ─────────────────────────────
        let audio = match &self.speech {
            None => None,
            Some(_) if text.trim().is_empty() => {
                notices.push("No text was recognised; speech skipped".to_string());
                None
            }
            Some(speech) => {
                self.set_pipeline(PipelineState::Synthesizing);
                match speech.synthesize(&text, &route.speech_code).await {
                    Ok(audio) => Some(audio),
                    Err(e) => {
                        log::warn!(
                            "pipeline: speech via {} failed ({e}); continuing without audio",
                            speech.name()
                        );
                        notices.push(format!("Speech synthesis failed: {e}"));
                        None
                    }
                }
            }
        };

        Ok(PipelineOutput {
            text,
            braille,
            language: route.tag,
            speech_language: route.speech_code,
            image,
            audio,
            notices,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_pipeline(&self, stage: PipelineState) {
        lock(&self.state).pipeline = stage;
    }

    fn set_error(&self, error: &PipelineError) {
        let message = error.to_string();
        log::error!("pipeline error: {message}");
        let mut st = lock(&self.state);
        st.pipeline = PipelineState::Error;
        st.error_message = Some(message);
    }
}

/// Lock the shared state.  A panic elsewhere leaves the fields consistent
/// enough to keep reporting, so poisoning is ignored.
fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::language::{ScriptDetector, PRIMARY_PREFIX, SECONDARY_PREFIX};
    use crate::ocr::MockOcrEngine;
    use crate::pipeline::state::new_shared_state;
    use crate::preprocess::tests::png_bytes;
    use crate::speech::SpeechError;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Returns the language code as the "audio" and counts calls.
    #[derive(Default)]
    struct EchoSpeech {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechSynthesizer for EchoSpeech {
        async fn synthesize(&self, _text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(language.as_bytes().to_vec())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    struct FailSpeech;

    #[async_trait]
    impl SpeechSynthesizer for FailSpeech {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            Err(SpeechError::Timeout)
        }

        fn name(&self) -> &str {
            "fail"
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.image.max_width = 64;
        config.image.max_height = 64;
        config
    }

    fn make_orchestrator(
        config: AppConfig,
        ocr: Arc<MockOcrEngine>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
        secondary_available: bool,
    ) -> (PipelineOrchestrator, SharedState) {
        let state = new_shared_state(config);
        let orc = PipelineOrchestrator::new(
            Arc::clone(&state),
            ocr,
            Arc::new(ScriptDetector),
            speech,
            secondary_available,
        );
        (orc, state)
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn english_text_gets_primary_prefix_and_audio() {
        let speech = Arc::new(EchoSpeech::default());
        let (orc, state) = make_orchestrator(
            small_config(),
            Arc::new(MockOcrEngine::ok("Hi")),
            Some(speech.clone()),
            true,
        );

        let out = orc.process(png_bytes(128, 64)).await.unwrap();

        assert_eq!(out.text, "Hi");
        assert_eq!(out.braille, format!("{PRIMARY_PREFIX}⠓⠊"));
        assert_eq!(out.language, LanguageTag::Primary);
        assert_eq!(out.speech_language, "en");
        assert_eq!(out.audio.as_deref(), Some(&b"en"[..]));
        assert_eq!(out.image.dimensions(), (64, 32));
        assert!(out.notices.is_empty());
        assert_eq!(speech.calls.load(Ordering::SeqCst), 1);

        let st = state.lock().unwrap();
        assert_eq!(st.pipeline, PipelineState::Done);
        assert_eq!(st.completed, 1);
        assert_eq!(st.last_output.as_ref().map(|o| o.text.as_str()), Some("Hi"));
    }

    #[tokio::test]
    async fn hindi_text_gets_secondary_prefix_and_voice() {
        let ocr = Arc::new(MockOcrEngine::ok("क्षमा"));
        let (orc, _state) = make_orchestrator(
            small_config(),
            ocr.clone(),
            Some(Arc::new(EchoSpeech::default())),
            true,
        );

        let out = orc.process(png_bytes(32, 32)).await.unwrap();

        assert!(out.braille.starts_with(SECONDARY_PREFIX));
        assert_eq!(out.braille, format!("{SECONDARY_PREFIX}⠟⠍⠡"));
        assert_eq!(out.language, LanguageTag::Secondary);
        assert_eq!(out.audio.as_deref(), Some(&b"hi"[..]));
        assert_eq!(ocr.last_selector().as_deref(), Some("eng+hin"));
    }

    #[tokio::test]
    async fn speech_failure_still_delivers_text_and_braille() {
        let (orc, state) = make_orchestrator(
            small_config(),
            Arc::new(MockOcrEngine::ok("hello")),
            Some(Arc::new(FailSpeech)),
            true,
        );

        let out = orc.process(png_bytes(16, 16)).await.unwrap();

        assert!(out.audio.is_none());
        assert_eq!(out.text, "hello");
        assert!(out.notices.iter().any(|n| n.contains("Speech synthesis failed")));
        assert_eq!(state.lock().unwrap().pipeline, PipelineState::Done);
    }

    #[tokio::test]
    async fn empty_text_skips_speech() {
        let speech = Arc::new(EchoSpeech::default());
        let (orc, _state) = make_orchestrator(
            small_config(),
            Arc::new(MockOcrEngine::ok("")),
            Some(speech.clone()),
            true,
        );

        let out = orc.process(png_bytes(16, 16)).await.unwrap();

        assert_eq!(out.text, "");
        assert_eq!(out.braille, PRIMARY_PREFIX);
        assert!(out.audio.is_none());
        assert!(out.notices.iter().any(|n| n.contains("speech skipped")));
        assert_eq!(speech.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_speech_is_never_called() {
        let mut config = small_config();
        config.speech.enabled = false;
        let speech = Arc::new(EchoSpeech::default());
        let (orc, _state) = make_orchestrator(
            config,
            Arc::new(MockOcrEngine::ok("text")),
            Some(speech.clone()),
            true,
        );

        let out = orc.process(png_bytes(16, 16)).await.unwrap();

        assert!(out.audio.is_none());
        assert!(out.notices.is_empty());
        assert_eq!(speech.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_secondary_pack_is_reported() {
        let ocr = Arc::new(MockOcrEngine::ok("hello"));
        let (orc, _state) = make_orchestrator(small_config(), ocr.clone(), None, false);

        let out = orc.process(png_bytes(16, 16)).await.unwrap();

        assert_eq!(ocr.last_selector().as_deref(), Some("eng"));
        assert!(out.notices.iter().any(|n| n.contains("'hin'")));
    }

    #[tokio::test]
    async fn ocr_failure_is_fatal() {
        let (orc, state) = make_orchestrator(
            small_config(),
            Arc::new(MockOcrEngine::err(OcrError::NotInstalled("tesseract".into()))),
            None,
            true,
        );

        let err = orc.process(png_bytes(16, 16)).await.unwrap_err();
        assert!(matches!(err, PipelineError::Ocr(OcrError::NotInstalled(_))));

        let st = state.lock().unwrap();
        assert_eq!(st.pipeline, PipelineState::Error);
        assert!(st.error_message.as_deref().unwrap_or("").contains("tesseract"));
        assert!(st.last_output.is_none());
    }

    #[tokio::test]
    async fn corrupt_image_fails_before_ocr() {
        let ocr = Arc::new(MockOcrEngine::ok("never"));
        let (orc, state) = make_orchestrator(small_config(), ocr.clone(), None, true);

        let err = orc.process(b"not an image".to_vec()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Image(ImageError::Decode(_))));
        assert!(ocr.last_selector().is_none());
        assert_eq!(state.lock().unwrap().pipeline, PipelineState::Error);
    }

    #[tokio::test]
    async fn repeated_text_is_served_from_cache() {
        let (orc, _state) =
            make_orchestrator(small_config(), Arc::new(MockOcrEngine::ok("same")), None, true);

        orc.process(png_bytes(16, 16)).await.unwrap();
        orc.process(png_bytes(16, 16)).await.unwrap();

        let stats = orc.transliterator().cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn run_loop_processes_requests_and_resets() {
        let (tx, rx) = mpsc::channel(4);
        let (orc, state) =
            make_orchestrator(small_config(), Arc::new(MockOcrEngine::ok("ok")), None, true);

        tx.send(PipelineRequest::Process(png_bytes(16, 16))).await.unwrap();
        tx.send(PipelineRequest::Process(b"junk".to_vec())).await.unwrap();
        drop(tx);
        orc.run(rx).await;

        {
            let st = state.lock().unwrap();
            assert_eq!(st.pipeline, PipelineState::Error);
            assert_eq!(st.completed, 1);
            // The last good output survives a later failure.
            assert!(st.last_output.is_some());
        }
    }

    #[tokio::test]
    async fn reset_returns_to_idle() {
        let (tx, rx) = mpsc::channel(4);
        let (orc, state) =
            make_orchestrator(small_config(), Arc::new(MockOcrEngine::ok("ok")), None, true);

        tx.send(PipelineRequest::Process(b"junk".to_vec())).await.unwrap();
        tx.send(PipelineRequest::Reset).await.unwrap();
        drop(tx);
        orc.run(rx).await;

        let st = state.lock().unwrap();
        assert_eq!(st.pipeline, PipelineState::Idle);
        assert!(st.error_message.is_none());
    }
}
