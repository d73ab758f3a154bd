//! OCR language selection and traineddata availability.
//!
//! Whether the secondary pack can be used is decided exactly once, at
//! startup, by [`resolve_secondary`].  The resulting [`LanguageSet`] is then
//! passed unchanged to every OCR call.

use std::path::{Path, PathBuf};

use crate::config::{OcrConfig, SecondaryPack};

/// Where Debian/Ubuntu's `tesseract-ocr` package installs its data.
pub const DEFAULT_TESSDATA_DIR: &str = "/usr/share/tesseract-ocr/4.00/tessdata";

/// Environment variable Tesseract itself consults for the data directory.
pub const TESSDATA_ENV: &str = "TESSDATA_PREFIX";

// ---------------------------------------------------------------------------
// LanguageSet
// ---------------------------------------------------------------------------

/// Ordered list of traineddata packs handed to the OCR engine.
///
/// ```rust
/// use braille_reader::ocr::LanguageSet;
///
/// let langs = LanguageSet::new("eng").with("hin");
/// assert_eq!(langs.selector(), "eng+hin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    packs: Vec<String>,
}

impl LanguageSet {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            packs: vec![primary.into()],
        }
    }

    /// Append `pack` unless it is already present.
    pub fn with(mut self, pack: impl Into<String>) -> Self {
        let pack = pack.into();
        if !self.packs.contains(&pack) {
            self.packs.push(pack);
        }
        self
    }

    /// Build the set from config and the startup availability decision.
    pub fn from_config(config: &OcrConfig, secondary_available: bool) -> Self {
        let set = Self::new(config.primary_pack.clone());
        if secondary_available {
            set.with(config.secondary_pack.clone())
        } else {
            set
        }
    }

    pub fn contains(&self, pack: &str) -> bool {
        self.packs.iter().any(|p| p == pack)
    }

    pub fn packs(&self) -> &[String] {
        &self.packs
    }

    /// Tesseract's `-l` argument: packs joined by `+`.
    pub fn selector(&self) -> String {
        self.packs.join("+")
    }
}

// ---------------------------------------------------------------------------
// Pack availability
// ---------------------------------------------------------------------------

/// Resolve the tessdata directory: explicit config, then `TESSDATA_PREFIX`,
/// then the distribution default.
pub fn tessdata_dir(config: &OcrConfig) -> PathBuf {
    tessdata_dir_with(config, std::env::var(TESSDATA_ENV).ok())
}

fn tessdata_dir_with(config: &OcrConfig, env_prefix: Option<String>) -> PathBuf {
    config
        .tessdata_dir
        .clone()
        .or(env_prefix)
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TESSDATA_DIR))
}

/// `true` when `<dir>/<pack>.traineddata` exists.
pub fn pack_installed(dir: &Path, pack: &str) -> bool {
    dir.join(format!("{pack}.traineddata")).is_file()
}

/// Decide whether the secondary pack should be requested.
///
/// [`SecondaryPack::Auto`] probes the tessdata directory; the other two
/// variants are taken at face value.
pub fn resolve_secondary(config: &OcrConfig) -> bool {
    match config.secondary {
        SecondaryPack::Enabled => true,
        SecondaryPack::Disabled => false,
        SecondaryPack::Auto => {
            let dir = tessdata_dir(config);
            let found = pack_installed(&dir, &config.secondary_pack);
            if found {
                log::info!(
                    "ocr: secondary pack '{}' found in {}",
                    config.secondary_pack,
                    dir.display()
                );
            } else {
                log::warn!(
                    "ocr: secondary pack '{}' not found in {}; recognising '{}' only",
                    config.secondary_pack,
                    dir.display(),
                    config.primary_pack
                );
            }
            found
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path, secondary: SecondaryPack) -> OcrConfig {
        OcrConfig {
            tessdata_dir: Some(dir.display().to_string()),
            secondary,
            ..OcrConfig::default()
        }
    }

    #[test]
    fn selector_joins_with_plus() {
        assert_eq!(LanguageSet::new("eng").selector(), "eng");
        assert_eq!(LanguageSet::new("eng").with("hin").selector(), "eng+hin");
    }

    #[test]
    fn duplicate_pack_is_ignored() {
        let set = LanguageSet::new("eng").with("eng");
        assert_eq!(set.packs(), &["eng".to_string()]);
    }

    #[test]
    fn from_config_respects_availability() {
        let cfg = OcrConfig::default();
        assert_eq!(LanguageSet::from_config(&cfg, true).selector(), "eng+hin");

        let only_primary = LanguageSet::from_config(&cfg, false);
        assert_eq!(only_primary.selector(), "eng");
        assert!(!only_primary.contains("hin"));
    }

    #[test]
    fn explicit_dir_beats_env() {
        let cfg = OcrConfig {
            tessdata_dir: Some("/opt/data".into()),
            ..OcrConfig::default()
        };
        assert_eq!(
            tessdata_dir_with(&cfg, Some("/env/data".into())),
            PathBuf::from("/opt/data")
        );
    }

    #[test]
    fn env_beats_default() {
        let cfg = OcrConfig::default();
        assert_eq!(
            tessdata_dir_with(&cfg, Some("/env/data".into())),
            PathBuf::from("/env/data")
        );
        assert_eq!(
            tessdata_dir_with(&cfg, None),
            PathBuf::from(DEFAULT_TESSDATA_DIR)
        );
    }

    #[test]
    fn auto_finds_installed_pack() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("hin.traineddata"), b"").unwrap();

        assert!(resolve_secondary(&config_in(dir.path(), SecondaryPack::Auto)));
    }

    #[test]
    fn auto_reports_missing_pack() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();

        assert!(!resolve_secondary(&config_in(dir.path(), SecondaryPack::Auto)));
    }

    #[test]
    fn explicit_policy_skips_probe() {
        let dir = tempdir().unwrap();
        assert!(resolve_secondary(&config_in(dir.path(), SecondaryPack::Enabled)));

        std::fs::write(dir.path().join("hin.traineddata"), b"").unwrap();
        assert!(!resolve_secondary(&config_in(dir.path(), SecondaryPack::Disabled)));
    }
}
