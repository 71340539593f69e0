//! Story chunking.
//!
//! Splits a novel into word-bounded chunks, grouped into chapters of five.
//! Supports a hard `max_words` cutoff plus a random early flush once
//! `min_words` is reached, driven by a caller-supplied [`Rng`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// Default minimum words before a chunk may be flushed early.
pub const DEFAULT_MIN_WORDS: usize = 500;

/// Default hard cap on words per chunk.
pub const DEFAULT_MAX_WORDS: usize = 1000;

/// Chunks per chapter before the chapter counter advances.
pub const CHUNKS_PER_CHAPTER: u32 = 5;

/// A draw above this value flushes a chunk that has reached `min_words`.
const EARLY_FLUSH_THRESHOLD: f64 = 0.7;

/// Identifier of a chunk, formatted as `chunk-<chapter>-<order>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(String);

impl ChunkId {
    pub fn new(chapter: u32, order: u32) -> Self {
        Self(format!("chunk-{chapter}-{order}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous span of story text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    /// Chapter number, starting at 1.
    pub chapter: u32,
    /// Position within the chapter, 1 through [`CHUNKS_PER_CHAPTER`].
    pub order: u32,
    pub text: String,
    pub word_count: usize,
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// The terminal punctuation stays with its sentence. Empty fragments are
/// dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {}
            _ => continue,
        }

        let sentence = text[start..i + ch.len_utf8()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }

        while let Some(&(_, c)) = chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            chars.next();
        }
        start = chars.peek().map(|&(j, _)| j).unwrap_or(text.len());
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Break a sentence longer than `max_words` into runs of at most `max_words`.
fn bounded_units(sentence: &str, max_words: usize) -> Vec<Cow<'_, str>> {
    if word_count(sentence) <= max_words {
        return vec![Cow::Borrowed(sentence)];
    }

    let words: Vec<&str> = sentence.split_whitespace().collect();
    words
        .chunks(max_words)
        .map(|run| Cow::Owned(run.join(" ")))
        .collect()
}

/// Accumulates sentences and hands out chapter/order positions.
struct ChunkBuilder {
    chunks: Vec<Chunk>,
    buffer: String,
    words: usize,
    chapter: u32,
    order: u32,
}

impl ChunkBuilder {
    fn new() -> Self {
        Self {
            chunks: Vec::new(),
            buffer: String::new(),
            words: 0,
            chapter: 1,
            order: 1,
        }
    }

    fn push(&mut self, unit: &str, words: usize) {
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(unit);
        self.words += words;
    }

    fn flush(&mut self) {
        let text = self.buffer.trim();
        if !text.is_empty() {
            self.chunks.push(Chunk {
                id: ChunkId::new(self.chapter, self.order),
                chapter: self.chapter,
                order: self.order,
                text: text.to_string(),
                word_count: self.words,
            });

            self.order += 1;
            if self.order > CHUNKS_PER_CHAPTER {
                self.chapter += 1;
                self.order = 1;
            }
        }
        self.buffer.clear();
        self.words = 0;
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

/// Split a novel into chunks.
///
/// A chunk is flushed when it reaches `max_words`, or, once it holds at
/// least `min_words`, whenever a uniform draw from `rng` exceeds 0.7. A
/// sentence that would overflow the current chunk starts a new one. Any
/// remaining text becomes a final chunk regardless of size.
///
/// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for
/// reproducible boundaries.
pub fn split_into_chunks<R: Rng + ?Sized>(
    text: &str,
    min_words: usize,
    max_words: usize,
    rng: &mut R,
) -> Vec<Chunk> {
    let max_words = max_words.max(1);
    let mut builder = ChunkBuilder::new();

    for sentence in split_sentences(text) {
        for unit in bounded_units(sentence, max_words) {
            let words = word_count(&unit);
            if words == 0 {
                continue;
            }

            if builder.words > 0 && builder.words + words > max_words {
                builder.flush();
            }
            builder.push(&unit, words);

            if builder.words >= max_words {
                builder.flush();
            } else if builder.words >= min_words && rng.gen::<f64>() > EARLY_FLUSH_THRESHOLD {
                builder.flush();
            }
        }
    }

    let chunks = builder.finish();
    debug!(
        chunks = chunks.len(),
        chapters = chunks.last().map(|c| c.chapter).unwrap_or(0),
        "split novel into chunks"
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("He ran. She hid!  Did they fight? The end");
        assert_eq!(sentences, vec!["He ran.", "She hid!", "Did they fight?", "The end"]);
    }

    #[test]
    fn test_split_sentences_keeps_inline_punctuation() {
        let sentences = split_sentences("The sign read 3.14 exactly. Then silence.");
        assert_eq!(sentences, vec!["The sign read 3.14 exactly.", "Then silence."]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_into_chunks("", 500, 1000, &mut rng()).is_empty());
        assert!(split_into_chunks("   \n\t ", 500, 1000, &mut rng()).is_empty());
    }

    #[test]
    fn test_short_text_is_single_trailing_chunk() {
        let chunks = split_into_chunks("Marcus ran. He fought the beast.", 500, 1000, &mut rng());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id.as_str(), "chunk-1-1");
        assert_eq!(chunks[0].text, "Marcus ran. He fought the beast.");
        assert_eq!(chunks[0].word_count, 6);
    }

    #[test]
    fn test_hard_cutoff_and_chapter_rollover() {
        // Every sentence is exactly max_words long, so each one is a chunk.
        let text = "One two three. ".repeat(7);
        let chunks = split_into_chunks(&text, 3, 3, &mut rng());

        let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "chunk-1-1", "chunk-1-2", "chunk-1-3", "chunk-1-4", "chunk-1-5", "chunk-2-1",
                "chunk-2-2",
            ]
        );
        assert!(chunks.iter().all(|c| c.word_count == 3));
    }

    #[test]
    fn test_sentence_overflow_starts_new_chunk() {
        // min == max: no early flush can fire, only overflow does.
        let text = "a b c d. e f g h. i j k l.";
        let chunks = split_into_chunks(text, 6, 6, &mut rng());
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "a b c d.");
        assert_eq!(chunks[2].text, "i j k l.");
    }

    #[test]
    fn test_overlong_sentence_is_split() {
        let sentence = (1..=25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let chunks = split_into_chunks(&sentence, 10, 10, &mut rng());
        let counts: Vec<usize> = chunks.iter().map(|c| c.word_count).collect();
        assert_eq!(counts, vec![10, 10, 5]);
    }

    #[test]
    fn test_word_bounds_hold_with_random_flush() {
        let text = "The wind howled across the moor tonight. ".repeat(200);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let chunks = split_into_chunks(&text, 20, 50, &mut rng);
            assert!(!chunks.is_empty());
            for chunk in &chunks {
                assert!(chunk.word_count > 0);
                assert!(chunk.word_count <= 50);
                assert_eq!(chunk.word_count, word_count(&chunk.text));
            }
            let total: usize = chunks.iter().map(|c| c.word_count).sum();
            assert_eq!(total, 1400);
        }
    }

    #[test]
    fn test_same_seed_same_boundaries() {
        let text = "Elena watched the road and waited for him. ".repeat(120);
        let a = split_into_chunks(&text, 30, 80, &mut StdRng::seed_from_u64(9));
        let b = split_into_chunks(&text, 30, 80, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
