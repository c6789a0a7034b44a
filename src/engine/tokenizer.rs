//! Shared tokenizer for document indexing and query parsing.

use std::collections::BTreeSet;

use crate::types::{IndexError, IndexResult};

/// Token delimiter. Other whitespace characters are control characters and
/// make a token invalid.
const DELIMITER: char = ' ';

/// Split text into non-empty words, left to right.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> + Clone {
    text.split(DELIMITER).filter(|word| !word.is_empty())
}

/// A word is valid when it contains no character below U+0020.
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Deterministic tokenizer with a stop-word set fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: BTreeSet<String>,
}

impl Tokenizer {
    /// Create a tokenizer from a collection of stop words.
    /// Empty strings are skipped; a stop word with a control character is rejected.
    pub fn new<I, S>(stop_words: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(IndexError::InvalidWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { stop_words: set })
    }

    /// Create a tokenizer from space-separated stop words, e.g. `"and with"`.
    pub fn from_text(stop_words_text: &str) -> IndexResult<Self> {
        Self::new(split_into_words(stop_words_text))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Stop words in ascending order.
    pub fn stop_words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }

    /// Tokenize document text, excluding stop words.
    /// Fails on the first token containing a control character.
    pub fn tokenize<'t>(&self, text: &'t str) -> IndexResult<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(IndexError::InvalidWord(word.to_string()));
            }
            if !self.is_stop_word(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_repeated_spaces() {
        let words: Vec<&str> = split_into_words("  funny  pet ").collect();
        assert_eq!(words, vec!["funny", "pet"]);
    }

    #[test]
    fn test_split_is_restartable() {
        let words = split_into_words("a b c");
        assert_eq!(words.clone().count(), 3);
        assert_eq!(words.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_control_characters_invalid() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("caf\u{e9}"));
        assert!(!is_valid_word("ca\u{12}t"));
        assert!(!is_valid_word("tab\there"));
    }

    #[test]
    fn test_stop_words_removed() {
        let tokenizer = Tokenizer::from_text("and with").unwrap();
        let tokens = tokenizer.tokenize("funny pet and nasty rat").unwrap();
        assert_eq!(tokens, vec!["funny", "pet", "nasty", "rat"]);
    }

    #[test]
    fn test_invalid_stop_word_rejected() {
        assert!(Tokenizer::new(["ok", "b\u{1}ad"]).is_err());
        let tokenizer = Tokenizer::new(["", "in"]).unwrap();
        assert_eq!(tokenizer.stop_words().collect::<Vec<_>>(), vec!["in"]);
    }
}
