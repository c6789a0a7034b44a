//! Document storage: text, metadata and the term index.

use std::collections::{btree_map, BTreeMap};

use log::debug;

use crate::engine::tokenizer::Tokenizer;
use crate::types::{DocumentId, DocumentStatus, ExecutionPolicy, IndexError, IndexResult};

use super::term_index::{TermIndex, WordFrequencies};

/// Per-document data owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub text: String,
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Ascending iterator over stored document ids.
pub type DocumentIds<'a> = std::iter::Copied<btree_map::Keys<'a, DocumentId, StoredDocument>>;

/// Owns every document and both directions of the term index.
/// Ids iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    documents: BTreeMap<DocumentId, StoredDocument>,
    index: TermIndex,
}

/// Arithmetic mean truncated toward zero; 0 for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. Validates the id and every token before touching any
    /// state, so a failed add records nothing.
    pub fn add(
        &mut self,
        tokenizer: &Tokenizer,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> IndexResult<()> {
        if id < 0 || self.documents.contains_key(&id) {
            return Err(IndexError::InvalidDocumentId(id));
        }
        let words = tokenizer.tokenize(text)?;

        self.index.insert(id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(
            id,
            StoredDocument {
                text: text.to_string(),
                rating,
                status,
            },
        );
        debug!(
            "added document {id}: {} terms, rating {rating}, status {status}",
            words.len()
        );
        Ok(())
    }

    /// Remove a document from the index and metadata. Unknown ids are ignored.
    pub fn remove(&mut self, id: DocumentId, policy: ExecutionPolicy) {
        if self.documents.remove(&id).is_none() {
            return;
        }
        self.index.remove(id, policy);
        debug!("removed document {id}");
    }

    pub fn get(&self, id: DocumentId) -> Option<&StoredDocument> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document ids in ascending order.
    pub fn ids(&self) -> DocumentIds<'_> {
        self.documents.keys().copied()
    }

    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.index.word_frequencies(id)
    }

    pub fn term_index(&self) -> &TermIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[-7, -2, -7]), -5);
        assert_eq!(compute_average_rating(&[-1, 2]), 0);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn test_failed_add_records_nothing() {
        let tokenizer = Tokenizer::default();
        let mut store = DocumentStore::new();
        let before = store.clone();
        assert!(store
            .add(&tokenizer, 1, "fine bro\u{3}ken", DocumentStatus::Actual, &[1])
            .is_err());
        assert_eq!(store, before);
    }
}
