//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\braille-reader\
//!   macOS:   ~/Library/Application Support/braille-reader/
//!   Linux:   ~/.config/braille-reader/
//!
//! Data dir (synthesized audio):
//!   Windows: %LOCALAPPDATA%\braille-reader\
//!   macOS:   ~/Library/Application Support/braille-reader/
//!   Linux:   ~/.local/share/braille-reader/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory where synthesized speech is written by the binary.
    pub audio_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "braille-reader";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let audio_dir = data_dir.join("audio");

        Self {
            config_dir,
            settings_file,
            audio_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
