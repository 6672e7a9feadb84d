/*!
 * Tests for word-boundary chunking
 */

use traduct::chunker::chunk_text;
use traduct::errors::TranslationError;

#[test]
fn test_chunkText_withZeroMaxLen_shouldReturnInvalidArgument() {
    let result = chunk_text("hello", 0);
    assert!(matches!(result, Err(TranslationError::InvalidArgument(_))));
}

#[test]
fn test_chunkText_withEmptyText_shouldReturnNoChunks() {
    let chunks = chunk_text("", 10).unwrap();
    assert!(chunks.is_empty());
}

#[test]
fn test_chunkText_withShortText_shouldReturnSingleChunk() {
    let chunks = chunk_text("hello world", 100).unwrap();
    assert_eq!(chunks, vec!["hello world".to_string()]);
}

#[test]
fn test_chunkText_withLongText_shouldRespectMaxLen() {
    let text = "the quick brown fox jumps over the lazy dog";
    let chunks = chunk_text(text, 10).unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(
            chunk.len() <= 10,
            "Chunk '{}' exceeds the limit without containing an oversized word",
            chunk
        );
    }
}

#[test]
fn test_chunkText_withLongText_shouldPreserveWordSequence() {
    let text = "the quick brown fox jumps over the lazy dog";
    let chunks = chunk_text(text, 10).unwrap();

    let rejoined = chunks.join(" ");
    let original_words: Vec<&str> = text.split_whitespace().collect();
    let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
    assert_eq!(rejoined_words, original_words);
}

#[test]
fn test_chunkText_withLongText_shouldNeverSplitWords() {
    let text = "alpha beta gamma delta epsilon zeta";
    let chunks = chunk_text(text, 12).unwrap();

    let original_words: Vec<&str> = text.split_whitespace().collect();
    for chunk in &chunks {
        for word in chunk.split_whitespace() {
            assert!(
                original_words.contains(&word),
                "Word '{}' in chunk '{}' is not a word of the input",
                word,
                chunk
            );
        }
    }
}

#[test]
fn test_chunkText_withOversizedWord_shouldKeepWordWhole() {
    let text = "hi supercalifragilisticexpialidocious yo";
    let chunks = chunk_text(text, 5).unwrap();

    assert!(
        chunks
            .iter()
            .any(|chunk| chunk == "supercalifragilisticexpialidocious"),
        "The oversized word must appear whole in its own chunk"
    );
}

#[test]
fn test_chunkText_withWhitespaceRuns_shouldPreserveWordSequence() {
    let text = "one\t\ttwo\n\nthree   four";
    let chunks = chunk_text(text, 9).unwrap();

    let rejoined = chunks.join(" ");
    assert_eq!(
        rejoined.split_whitespace().collect::<Vec<_>>(),
        vec!["one", "two", "three", "four"]
    );
}

#[test]
fn test_chunkText_withMaxLenOne_shouldEmitOneWordPerChunk() {
    let chunks = chunk_text("a bc def", 1).unwrap();
    assert_eq!(
        chunks,
        vec!["a".to_string(), "bc".to_string(), "def".to_string()]
    );
}

#[test]
fn test_chunkText_withExactFit_shouldFillChunks() {
    // "ab cd" is exactly 5 bytes, so it fits one chunk of 5
    let chunks = chunk_text("ab cd ef", 5).unwrap();
    assert_eq!(chunks, vec!["ab cd".to_string(), "ef".to_string()]);
}
