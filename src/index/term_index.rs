//! Mirrored term-frequency indexes: term → documents and document → terms.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rayon::prelude::*;

use crate::types::{DocumentId, ExecutionPolicy};

/// Interned token handle shared by both directions of the index.
pub type Term = Arc<str>;

/// Normalized term frequencies keyed by term.
pub type WordFrequencies = BTreeMap<Term, f64>;

static EMPTY_FREQUENCIES: WordFrequencies = BTreeMap::new();

/// An inverted index mapping terms to per-document normalized term frequencies,
/// kept in sync with its reverse (per-document) view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermIndex {
    /// term → (document id → term frequency), postings ordered by id
    word_to_document_freqs: HashMap<Term, BTreeMap<DocumentId, f64>>,
    /// document id → (term → term frequency)
    document_to_word_freqs: BTreeMap<DocumentId, WordFrequencies>,
}

impl TermIndex {
    /// Create an empty term index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one document's (stop-word-free) tokens.
    /// Each frequency is occurrences / token count. An empty token list leaves
    /// the index untouched.
    pub fn insert(&mut self, id: DocumentId, words: &[&str]) {
        if words.is_empty() {
            return;
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in words {
            *counts.entry(word).or_insert(0) += 1;
        }

        let total = words.len() as f64;
        let mut frequencies = WordFrequencies::new();
        for (word, count) in counts {
            let term = self.intern(word);
            let tf = count as f64 / total;
            self.word_to_document_freqs
                .entry(term.clone())
                .or_default()
                .insert(id, tf);
            frequencies.insert(term, tf);
        }
        self.document_to_word_freqs.insert(id, frequencies);
    }

    /// Remove a document from both directions. Terms left without postings are
    /// dropped, so a remove undoes the matching insert exactly.
    pub fn remove(&mut self, id: DocumentId, policy: ExecutionPolicy) {
        let Some(frequencies) = self.document_to_word_freqs.remove(&id) else {
            return;
        };

        match policy {
            ExecutionPolicy::Sequential => {
                for term in frequencies.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(term) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.word_to_document_freqs.remove(term);
                        }
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                let mut touched: Vec<(Term, BTreeMap<DocumentId, f64>)> = frequencies
                    .keys()
                    .filter_map(|term| self.word_to_document_freqs.remove_entry(term))
                    .collect();
                touched.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                self.word_to_document_freqs.extend(
                    touched
                        .into_iter()
                        .filter(|(_, postings)| !postings.is_empty()),
                );
            }
        }
    }

    /// Postings for a term: (document id → term frequency).
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.word_to_document_freqs.get(term)
    }

    /// Number of documents containing a term (document frequency).
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings(term).map_or(0, BTreeMap::len)
    }

    /// Whether `id` contains `term`.
    pub fn contains(&self, term: &str, id: DocumentId) -> bool {
        self.postings(term).is_some_and(|p| p.contains_key(&id))
    }

    /// Term frequencies of one document, or an empty map.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.document_to_word_freqs
            .get(&id)
            .unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Number of unique terms.
    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    fn intern(&self, word: &str) -> Term {
        match self.word_to_document_freqs.get_key_value(word) {
            Some((term, _)) => Arc::clone(term),
            None => Arc::from(word),
        }
    }
}
