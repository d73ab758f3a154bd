//! Splitting text into request-sized pieces.
//!
//! The translate-TTS endpoint rejects long `q` values, so text is cut into
//! chunks of at most [`MAX_CHUNK_CHARS`] chars.  Cuts fall on whitespace
//! where possible; a single word longer than the limit is split mid-word.

/// Longest chunk, in chars, sent in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Split `text` into non-empty chunks of at most `max_chars` chars each.
///
/// Runs of whitespace between words collapse to one space inside a chunk;
/// leading and trailing whitespace is dropped.
///
/// ```rust
/// use braille_reader::speech::chunk_text;
///
/// assert_eq!(chunk_text("one two three", 7), vec!["one two", "three"]);
/// assert!(chunk_text("   ", 100).is_empty());
/// ```
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
