//! Match a query against a single document.

use rayon::prelude::*;

use crate::types::{DocumentId, DocumentStatus, ExecutionPolicy, IndexError, IndexResult};

use super::search_server::SearchServer;
use super::tokenizer::is_valid_word;

impl SearchServer {
    /// Plus-terms of `raw_query` that document `id` contains, sorted and
    /// deduplicated, together with the document's status.
    ///
    /// If the document contains any minus-term the list is empty. Fails with
    /// an invalid-argument error for a malformed query and an out-of-range
    /// error for an unknown id.
    pub fn match_document<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        id: DocumentId,
    ) -> IndexResult<(Vec<&'q str>, DocumentStatus)> {
        if !is_valid_word(raw_query) {
            return Err(IndexError::InvalidQueryWord(raw_query.to_string()));
        }
        let status = self
            .document_status(id)
            .ok_or(IndexError::DocumentNotFound(id))?;
        let words = self.word_frequencies(id);

        let matched = match policy {
            ExecutionPolicy::Sequential => {
                let query = self.parse_query(raw_query, true)?;
                if query.minus_terms.iter().any(|term| words.contains_key(*term)) {
                    return Ok((Vec::new(), status));
                }
                query
                    .plus_terms
                    .into_iter()
                    .filter(|term| words.contains_key(*term))
                    .collect()
            }
            ExecutionPolicy::Parallel => {
                let query = self.parse_query(raw_query, false)?;
                if query
                    .minus_terms
                    .par_iter()
                    .any(|term| words.contains_key(*term))
                {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&str> = query
                    .plus_terms
                    .into_par_iter()
                    .filter(|term| words.contains_key(*term))
                    .collect();
                matched.par_sort_unstable();
                matched.dedup();
                matched
            }
        };

        Ok((matched, status))
    }
}
