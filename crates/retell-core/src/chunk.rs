use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;

/// Split text into chunks of at most `max_chars`, breaking only at
/// sentence boundaries (". ").
///
/// Sentences are packed greedily in order. A single sentence longer than
/// `max_chars` is emitted as its own oversized chunk rather than being split
/// mid-sentence. Terminal punctuation is re-inserted at sentence boundaries,
/// so rejoining the chunks reproduces the original content modulo whitespace.
pub fn split_sentences(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split(". ") {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if !current.is_empty() && current.len() + sentence.len() + 1 > max_chars {
            chunks.push(current.trim_end().to_string());
            current.clear();
        }
        current.push_str(sentence);
        if !sentence.ends_with(['.', '!', '?']) {
            current.push('.');
        }
        current.push(' ');
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }

    chunks
}

/// A text transform applied to one chunk at a time (translation, summarization).
#[async_trait]
pub trait ChunkTransform {
    async fn apply(&self, chunk: &str) -> Result<String>;
}

/// Apply `transform` to each chunk in order and join the results with
/// `separator`.
///
/// Chunks are processed strictly sequentially. A failing chunk contributes
/// `placeholder` at its position; the remaining chunks still run, so one bad
/// chunk never aborts the batch.
pub async fn transform_chunks<T>(
    chunks: &[String],
    transform: &T,
    placeholder: &str,
    separator: &str,
) -> String
where
    T: ChunkTransform + ?Sized,
{
    let total = chunks.len();
    let mut results = Vec::with_capacity(total);

    for (idx, chunk) in chunks.iter().enumerate() {
        info!(chunk = idx + 1, total, "transforming chunk");
        match transform.apply(chunk).await {
            Ok(output) => results.push(output.trim().to_string()),
            Err(e) => {
                warn!(chunk = idx + 1, total, error = %e, "chunk transform failed");
                results.push(placeholder.to_string());
            }
        }
    }

    results.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetellError;

    #[test]
    fn packs_sentences_up_to_max() {
        let text = "One two. Three four. Five six.";
        let chunks = split_sentences(text, 20);
        assert_eq!(chunks, vec!["One two. Three four.", "Five six."]);
    }

    #[test]
    fn never_splits_inside_a_sentence() {
        let text = "The quick brown fox jumps. Over the lazy dog. End.";
        for max in 1..=text.len() {
            for chunk in split_sentences(text, max) {
                // Every chunk is a whole number of sentences.
                assert!(chunk.ends_with('.'), "chunk {chunk:?} cut mid-sentence");
                assert!(!chunk.starts_with(' '));
            }
        }
    }

    #[test]
    fn chunks_respect_max_unless_single_sentence_exceeds_it() {
        let text = "Short. A considerably longer sentence that cannot fit. Tail.";
        let chunks = split_sentences(text, 12);
        for chunk in &chunks {
            let sentences = chunk.matches(". ").count() + 1;
            assert!(
                chunk.len() <= 12 || sentences == 1,
                "multi-sentence chunk over max: {chunk:?}"
            );
        }
    }

    #[test]
    fn oversized_sentence_is_its_own_chunk() {
        let text = "Tiny. This single sentence is far longer than the maximum. Tiny.";
        let chunks = split_sentences(text, 10);
        assert_eq!(
            chunks,
            vec![
                "Tiny.",
                "This single sentence is far longer than the maximum.",
                "Tiny.",
            ]
        );
    }

    #[test]
    fn rejoining_reproduces_content() {
        let text = "First sentence here. Second sentence there. Third one closes";
        let chunks = split_sentences(text, 25);
        let rejoined = chunks.join(" ");
        let normalize = |s: &str| s.replace(['.', ' '], "");
        assert_eq!(normalize(&rejoined), normalize(text));
    }

    #[test]
    fn three_sentences_with_single_sentence_max_yield_three_chunks() {
        let text = "Alpha is one. Bravo is two. Charlie is three.";
        let chunks = split_sentences(text, 1);
        assert_eq!(chunks, vec!["Alpha is one.", "Bravo is two.", "Charlie is three."]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split_sentences("", 100).is_empty());
        assert!(split_sentences("   ", 100).is_empty());
    }

    /// Uppercases every chunk, failing on chunks that contain `fail_on`.
    struct FlakyUppercase {
        fail_on: &'static str,
    }

    #[async_trait]
    impl ChunkTransform for FlakyUppercase {
        async fn apply(&self, chunk: &str) -> Result<String> {
            if chunk.contains(self.fail_on) {
                return Err(RetellError::ApiResponseInvalid {
                    reason: "stubbed failure".to_string(),
                });
            }
            Ok(chunk.to_uppercase())
        }
    }

    #[tokio::test]
    async fn failing_chunk_gets_placeholder_in_position() {
        let chunks = vec![
            "first part.".to_string(),
            "second part.".to_string(),
            "third part.".to_string(),
        ];
        let transform = FlakyUppercase { fail_on: "second" };
        let joined = transform_chunks(&chunks, &transform, "[failed]", " ").await;
        assert_eq!(joined, "FIRST PART. [failed] THIRD PART.");
    }

    #[tokio::test]
    async fn all_chunks_succeed_in_order() {
        let chunks = vec!["a.".to_string(), "b.".to_string()];
        let transform = FlakyUppercase { fail_on: "\u{0}" };
        let joined = transform_chunks(&chunks, &transform, "[failed]", "\n").await;
        assert_eq!(joined, "A.\nB.");
    }
}
