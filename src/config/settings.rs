//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// NormalizeMode
// ---------------------------------------------------------------------------

/// Selects how much image preprocessing runs before OCR.
///
/// | Variant  | Pipeline                                   |
/// |----------|--------------------------------------------|
/// | Plain    | Decode → bounded resize → OCR              |
/// | Enhanced | Decode → bounded resize → Otsu binarize → OCR |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeMode {
    /// Resize only; OCR sees the colour image.
    Plain,
    /// Resize, then reduce to a black/white image for OCR.
    Enhanced,
}

impl Default for NormalizeMode {
    fn default() -> Self {
        Self::Enhanced
    }
}

// ---------------------------------------------------------------------------
// ImageConfig
// ---------------------------------------------------------------------------

/// Bounds applied by the image normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// Decoded images with more pixels than this are rejected outright.
    pub max_input_pixels: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: 1024,
            max_height: 1024,
            max_input_pixels: 40_000_000,
        }
    }
}

// ---------------------------------------------------------------------------
// OcrConfig
// ---------------------------------------------------------------------------

/// Whether the secondary-script OCR pack should be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryPack {
    /// Probe the tessdata directory once at startup.
    Auto,
    /// Always request the secondary pack.
    Enabled,
    /// Never request the secondary pack.
    Disabled,
}

impl Default for SecondaryPack {
    fn default() -> Self {
        Self::Auto
    }
}

/// Settings for the Tesseract OCR collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Executable name or path of the `tesseract` binary.
    pub command: String,
    /// Traineddata pack for the primary script (e.g. `"eng"`).
    pub primary_pack: String,
    /// Traineddata pack for the secondary script (e.g. `"hin"`).
    pub secondary_pack: String,
    /// Explicit tessdata directory.  `None` falls back to `TESSDATA_PREFIX`.
    pub tessdata_dir: Option<String>,
    /// Secondary pack availability policy.
    pub secondary: SecondaryPack,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".into(),
            primary_pack: "eng".into(),
            secondary_pack: "hin".into(),
            tessdata_dir: None,
            secondary: SecondaryPack::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageConfig
// ---------------------------------------------------------------------------

/// ISO-639-1 codes for the two languages this deployment routes between.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Default language; also the fallback when detection fails.
    pub primary: String,
    /// The other routable language.
    pub secondary: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            primary: "en".into(),
            secondary: "hi".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// BrailleConfig
// ---------------------------------------------------------------------------

/// Transliteration engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrailleConfig {
    /// Maximum number of distinct texts kept in the result cache.
    pub cache_capacity: usize,
}

impl Default for BrailleConfig {
    fn default() -> Self {
        Self { cache_capacity: 128 }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-synthesis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether audio is synthesized at all.
    pub enabled: bool,
    /// Base URL of the translate-TTS endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for a single synthesis request.
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://translate.google.com".into(),
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use braille_reader::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selected preprocessing mode.
    pub mode: NormalizeMode,
    /// Upper bound on one whole pipeline invocation, enforced by the caller.
    pub request_timeout_secs: u64,
    /// Image normalizer bounds.
    pub image: ImageConfig,
    /// OCR collaborator settings.
    pub ocr: OcrConfig,
    /// Language routing settings.
    pub language: LanguageConfig,
    /// Transliteration engine settings.
    pub braille: BrailleConfig,
    /// Speech collaborator settings.
    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: NormalizeMode::default(),
            request_timeout_secs: 60,
            image: ImageConfig::default(),
            ocr: OcrConfig::default(),
            language: LanguageConfig::default(),
            braille: BrailleConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet so
    /// callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
