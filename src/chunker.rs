/*!
 * Word-boundary chunking of long text.
 *
 * Translation engines accept a bounded amount of input per call. This module
 * splits longer text into chunks that respect that bound without ever
 * splitting inside a word.
 */

use crate::errors::{TranslationError, TranslationResult};

/// Split text into chunks of at most `max_len` bytes, breaking only at
/// whitespace boundaries.
///
/// A single word longer than `max_len` is emitted as its own oversized
/// chunk rather than being split. Whitespace runs between words collapse to
/// a single space inside chunks; the word sequence of the concatenated
/// chunks always equals the word sequence of the input.
pub fn chunk_text(text: &str, max_len: usize) -> TranslationResult<Vec<String>> {
    if max_len < 1 {
        return Err(TranslationError::InvalidArgument(
            "Chunk size must be at least 1".to_string(),
        ));
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_len {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    Ok(chunks)
}
