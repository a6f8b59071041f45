//! Word segmentation for OCR text that lost its spaces.
//!
//! Recognition engines often glue a whole line together ("HELLOWORLD").
//! Before grouping, detections whose text has no space are run through a
//! [`WordSegmenter`] and the tokens are rejoined with single spaces.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Splits a string without whitespace into a best-effort token sequence.
pub trait WordSegmenter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

impl<F> WordSegmenter for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn split(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Rewrites `text` with segmented tokens if it contains no space character.
///
/// Text that already has a space is returned unchanged, and so is text the
/// segmenter produces no tokens for.
pub fn apply_segmentation(text: &str, segmenter: &dyn WordSegmenter) -> String {
    if text.contains(' ') {
        return text.to_string();
    }

    let tokens = segmenter.split(text);
    if tokens.is_empty() {
        if !text.is_empty() {
            warn!(text, "segmenter returned no tokens, keeping original text");
        }
        return text.to_string();
    }
    tokens.join(" ")
}

/// Dictionary-driven segmenter using a Zipf cost model.
///
/// A word at frequency rank `r` (0-based) in a list of `N` words costs
/// `ln((r + 1) * ln N)`; unknown substrings cost infinity. The cheapest
/// segmentation is found by dynamic programming over the lowercased input.
#[derive(Debug, Clone)]
pub struct DictionarySegmenter {
    costs: HashMap<String, f64>,
    max_word_len: usize,
}

impl DictionarySegmenter {
    /// Builds a segmenter from words ordered most frequent first.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let ln_n = (words.len().max(2) as f64).ln();
        let mut costs = HashMap::with_capacity(words.len());
        let mut max_word_len = 0;
        for (rank, word) in words.into_iter().enumerate() {
            max_word_len = max_word_len.max(word.len());
            costs.insert(word, ((rank + 1) as f64 * ln_n).ln());
        }

        Self {
            costs,
            max_word_len,
        }
    }

    /// Loads a word list with one word per line, most frequent first.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_words(contents.lines()))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    fn word_cost(&self, word: &str) -> f64 {
        self.costs.get(word).copied().unwrap_or(f64::INFINITY)
    }

    /// Segments one run of ASCII letters, digits and apostrophes.
    fn split_run(&self, run: &str) -> Vec<String> {
        if self.max_word_len == 0 {
            return vec![run.to_string()];
        }

        let lower = run.to_ascii_lowercase();
        let n = run.len();

        // best[i] = (cost of the cheapest segmentation of run[..i], length of
        // its last word)
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(n + 1);
        best.push((0.0, 0));
        for i in 1..=n {
            let choice = (1..=self.max_word_len.min(i))
                .map(|k| (best[i - k].0 + self.word_cost(&lower[i - k..i]), k))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                .unwrap_or((f64::INFINITY, 1));
            best.push(choice);
        }

        let bytes = run.as_bytes();
        let mut out: Vec<String> = Vec::new();
        let mut i = n;
        while i > 0 {
            let k = best[i].1;
            let token = &run[i - k..i];
            let mut glued = false;
            if token != "'" {
                if let Some(last) = out.last_mut() {
                    let digits = bytes[i - 1].is_ascii_digit()
                        && last.as_bytes().first().is_some_and(u8::is_ascii_digit);
                    if last == "'s" || digits {
                        last.insert_str(0, token);
                        glued = true;
                    }
                }
            }
            if !glued {
                out.push(token.to_string());
            }
            i -= k;
        }
        out.reverse();
        out
    }
}

impl WordSegmenter for DictionarySegmenter {
    /// Splits on anything that is not an ASCII letter, digit or apostrophe
    /// (dropping it), then segments each run.
    fn split(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
            .filter(|run| !run.is_empty())
            .flat_map(|run| self.split_run(run))
            .collect()
    }
}
