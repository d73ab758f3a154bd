//! [`TesseractEngine`]: OCR through the `tesseract` command-line tool.
//!
//! The normalized image is written to a temporary PNG and recognised with
//! `tesseract <png> stdout -l <packs>`.  The temp file is removed when the
//! call returns.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::OcrConfig;
use crate::preprocess::NormalizedImage;

use super::languages::{tessdata_dir, LanguageSet};
use super::{OcrEngine, OcrError};

/// Runs the `tesseract` binary once per recognition.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, tessdata_dir: Option<PathBuf>) -> Self {
        Self {
            command: command.into(),
            tessdata_dir,
        }
    }

    /// Engine using `config.command`.  The tessdata directory is passed
    /// explicitly only when the config names one; otherwise tesseract's own
    /// lookup (including `TESSDATA_PREFIX`) applies.
    pub fn from_config(config: &OcrConfig) -> Self {
        let dir = config.tessdata_dir.as_ref().map(|_| tessdata_dir(config));
        Self::new(config.command.clone(), dir)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn args(&self, png: &Path, languages: &LanguageSet) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            png.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            languages.selector().into(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".into());
            args.push(dir.as_os_str().to_owned());
        }
        args
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String, OcrError> {
        let png = image
            .ocr_png()
            .map_err(|e| OcrError::Input(e.to_string()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix("braille-reader-")
            .suffix(".png")
            .tempfile()?;
        tmp.write_all(&png)?;
        tmp.flush()?;

        log::debug!(
            "ocr: {} {} (-l {})",
            self.command,
            tmp.path().display(),
            languages.selector()
        );

        let output = Command::new(&self.command)
            .args(self.args(tmp.path(), languages))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::NotInstalled(self.command.clone())
                } else {
                    OcrError::Io(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = strip_page_break(&String::from_utf8_lossy(&output.stdout)).to_string();
        log::debug!("ocr: recognised {} chars", text.chars().count());
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Drop the trailing newlines and form feed tesseract appends to each page.
/// Everything else, leading indentation included, is kept as recognised.
fn strip_page_break(stdout: &str) -> &str {
    stdout.trim_end_matches(['\n', '\r', '\x0c'])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn blank_page() -> NormalizedImage {
        NormalizedImage {
            color: RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])),
            binary: None,
        }
    }

    #[test]
    fn args_carry_language_selector() {
        let engine = TesseractEngine::new("tesseract", None);
        let args = engine.args(Path::new("/tmp/page.png"), &LanguageSet::new("eng").with("hin"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["/tmp/page.png", "stdout", "-l", "eng+hin"]);
    }

    #[test]
    fn args_include_tessdata_dir_when_configured() {
        let cfg = OcrConfig {
            tessdata_dir: Some("/opt/tessdata".into()),
            ..OcrConfig::default()
        };
        let engine = TesseractEngine::from_config(&cfg);
        let args = engine.args(Path::new("p.png"), &LanguageSet::new("eng"));
        let tail: Vec<_> = args[4..].iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(tail, ["--tessdata-dir", "/opt/tessdata"]);
    }

    #[test]
    fn from_config_without_dir_passes_none() {
        let engine = TesseractEngine::from_config(&OcrConfig::default());
        assert_eq!(engine.command(), "tesseract");
        assert_eq!(engine.args(Path::new("p.png"), &LanguageSet::new("eng")).len(), 4);
    }

    #[test]
    fn missing_binary_is_not_installed() {
        let engine = TesseractEngine::new("/nonexistent/bin/tesseract-xyz", None);
        let err = engine
            .recognize(&blank_page(), &LanguageSet::new("eng"))
            .unwrap_err();
        assert!(matches!(err, OcrError::NotInstalled(_)), "{err:?}");
    }

    #[test]
    fn page_break_is_stripped() {
        assert_eq!(strip_page_break("Hello\nworld\n\x0c"), "Hello\nworld");
        assert_eq!(strip_page_break("\n\x0c"), "");
    }

    #[test]
    fn leading_indentation_is_kept() {
        assert_eq!(strip_page_break("    indented\n  line  \n\x0c"), "    indented\n  line  ");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failure() {
        // `false` ignores its arguments and exits 1.
        let engine = TesseractEngine::new("false", None);
        let err = engine
            .recognize(&blank_page(), &LanguageSet::new("eng"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Failed { status: Some(1), .. }), "{err:?}");
    }
}
