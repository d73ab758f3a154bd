//! [`GoogleTts`]: speech through the public Google Translate TTS endpoint.
//!
//! Each chunk of text is fetched as MP3 from
//! `{base_url}/translate_tts?ie=UTF-8&client=tw-ob&tl=<lang>&q=<chunk>`.
//! MP3 frames are self-delimiting, so the chunk bodies are concatenated
//! into one playable stream.

use async_trait::async_trait;

use crate::config::SpeechConfig;

use super::chunk::{chunk_text, MAX_CHUNK_CHARS};
use super::{SpeechError, SpeechSynthesizer};

const USER_AGENT: &str = concat!("braille-reader/", env!("CARGO_PKG_VERSION"));

pub struct GoogleTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTts {
    /// Build a client with the per-request timeout from `config.timeout_secs`.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        log::debug!(
            "speech: {} chunk(s) of '{language}' text via {}",
            chunks.len(),
            self.base_url
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }

    fn name(&self) -> &str {
        "google-translate-tts"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> SpeechConfig {
        SpeechConfig {
            enabled: true,
            base_url: base_url.into(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn from_config_trims_trailing_slash() {
        let tts = GoogleTts::from_config(&config("https://translate.google.com/"));
        assert_eq!(tts.endpoint(), "https://translate.google.com/translate_tts");
    }

    #[test]
    fn is_object_safe() {
        let tts: Box<dyn SpeechSynthesizer> =
            Box::new(GoogleTts::from_config(&SpeechConfig::default()));
        assert_eq!(tts.name(), "google-translate-tts");
    }

    #[tokio::test]
    async fn blank_text_fails_without_a_request() {
        // Unroutable base URL: any request attempt would surface as Request.
        let tts = GoogleTts::from_config(&config("http://127.0.0.1:9"));
        let err = tts.synthesize("  \n ", "en").await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        let tts = GoogleTts::from_config(&config("http://127.0.0.1:9"));
        let err = tts.synthesize("hello", "en").await.unwrap_err();
        assert!(
            matches!(err, SpeechError::Request(_) | SpeechError::Timeout),
            "{err:?}"
        );
    }
}
