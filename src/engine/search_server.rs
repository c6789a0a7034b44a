//! The search server: tokenizer, document store and ranking configuration.

use crate::index::{DocumentIds, DocumentStore, StoredDocument, WordFrequencies};
use crate::types::{DocumentId, DocumentStatus, ExecutionPolicy, IndexResult, SearchConfig};

use super::query::{parse_query, ParsedQuery};
use super::tokenizer::Tokenizer;

/// An in-memory TF-IDF document index.
///
/// Queries take `&self` and may run from many threads at once; `add_document`
/// and `remove_document` take `&mut self`, so a mutation can never overlap a
/// query on the same instance. Share across threads with a read/write lock.
#[derive(Debug, Clone)]
pub struct SearchServer {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) store: DocumentStore,
    pub(crate) config: SearchConfig,
}

impl SearchServer {
    /// Create a server with the given stop words.
    pub fn new<I, S>(stop_words: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_tokenizer(Tokenizer::new(stop_words)?))
    }

    /// Create a server from space-separated stop words, e.g. `"and with"`.
    pub fn from_stop_words_text(text: &str) -> IndexResult<Self> {
        Ok(Self::from_tokenizer(Tokenizer::from_text(text)?))
    }

    pub fn from_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            store: DocumentStore::new(),
            config: SearchConfig::default(),
        }
    }

    /// Replace the ranking configuration.
    pub fn with_config(mut self, config: SearchConfig) -> IndexResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Add a document. Fails with an invalid-argument error for a negative or
    /// duplicate id, or a token containing a control character.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> IndexResult<()> {
        self.store.add(&self.tokenizer, id, text, status, ratings)
    }

    /// Remove a document. Removing an unknown id does nothing.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.store.remove(id, ExecutionPolicy::Sequential);
    }

    /// Remove a document with an explicit execution policy.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocumentId) {
        self.store.remove(id, policy);
    }

    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// Document ids in ascending order.
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.store.ids()
    }

    /// Normalized term frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.store.word_frequencies(id)
    }

    pub fn document_text(&self, id: DocumentId) -> Option<&str> {
        self.store.get(id).map(|doc| doc.text.as_str())
    }

    pub fn document_status(&self, id: DocumentId) -> Option<DocumentStatus> {
        self.store.get(id).map(|doc| doc.status)
    }

    pub fn document_rating(&self, id: DocumentId) -> Option<i32> {
        self.store.get(id).map(|doc| doc.rating)
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub(crate) fn stored(&self, id: DocumentId) -> Option<&StoredDocument> {
        self.store.get(id)
    }

    /// Parse a query against this server's stop words.
    pub fn parse_query<'q>(&self, text: &'q str, dedupe: bool) -> IndexResult<ParsedQuery<'q>> {
        parse_query(&self.tokenizer, text, dedupe)
    }

    /// Inverse document frequency: ln(total documents / documents with term).
    /// `None` when no document contains the term.
    pub(crate) fn inverse_document_freq(&self, term: &str) -> Option<f64> {
        let df = self.store.term_index().doc_frequency(term);
        (df > 0).then(|| (self.store.len() as f64 / df as f64).ln())
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.ids()
    }
}
