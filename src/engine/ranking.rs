//! TF-IDF ranking with sequential and parallel execution.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::trace;
use rayon::prelude::*;

use crate::index::ConcurrentMap;
use crate::types::{Document, DocumentId, DocumentStatus, ExecutionPolicy, IndexResult};

use super::query::ParsedQuery;
use super::search_server::SearchServer;

fn by_rating_then_id(lhs: &Document, rhs: &Document) -> Ordering {
    rhs.rating.cmp(&lhs.rating).then_with(|| lhs.id.cmp(&rhs.id))
}

/// Sort by relevance descending. Documents within `epsilon` of the most
/// relevant document of their group are tied and ordered by rating
/// descending, then id ascending. A group never spans more than `epsilon`.
pub fn sort_by_relevance(documents: &mut [Document], epsilon: f64, policy: ExecutionPolicy) {
    let by_relevance = |lhs: &Document, rhs: &Document| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| by_rating_then_id(lhs, rhs))
    };
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(by_relevance),
        ExecutionPolicy::Parallel => documents.par_sort_by(by_relevance),
    }

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && documents[start].relevance - documents[end].relevance < epsilon
        {
            end += 1;
        }
        if end - start > 1 {
            documents[start..end].sort_by(by_rating_then_id);
        }
        start = end;
    }
}

impl SearchServer {
    /// Every document matching `query` and `predicate`, unsorted.
    ///
    /// Plus-terms add `tf * idf` to each accepted document; any document
    /// containing a minus-term is then dropped regardless of its relevance.
    /// Terms absent from the index contribute nothing.
    pub fn find_all_documents<P>(
        &self,
        policy: ExecutionPolicy,
        query: &ParsedQuery<'_>,
        predicate: P,
    ) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let document_to_relevance = match policy {
            ExecutionPolicy::Sequential => self.accumulate_sequential(query, &predicate),
            ExecutionPolicy::Parallel => self.accumulate_parallel(query, &predicate),
        };

        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.stored(id)
                    .map(|doc| Document::new(id, relevance, doc.rating))
            })
            .collect()
    }

    fn accumulate_sequential<P>(
        &self,
        query: &ParsedQuery<'_>,
        predicate: &P,
    ) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let index = self.store.term_index();
        let mut document_to_relevance = BTreeMap::new();

        for term in &query.plus_terms {
            let (Some(postings), Some(idf)) = (index.postings(term), self.inverse_document_freq(term))
            else {
                continue;
            };
            for (&id, &tf) in postings {
                if self.accepts(id, predicate) {
                    *document_to_relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for term in &query.minus_terms {
            if let Some(postings) = index.postings(term) {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            }
        }

        document_to_relevance
    }

    fn accumulate_parallel<P>(
        &self,
        query: &ParsedQuery<'_>,
        predicate: &P,
    ) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let index = self.store.term_index();
        let document_to_relevance: ConcurrentMap<DocumentId, f64> =
            ConcurrentMap::new(self.config.effective_shard_count());

        query.plus_terms.par_iter().for_each(|term| {
            let (Some(postings), Some(idf)) = (index.postings(term), self.inverse_document_freq(term))
            else {
                return;
            };
            postings.par_iter().for_each(|(&id, &tf)| {
                if self.accepts(id, predicate) {
                    *document_to_relevance.access(id) += tf * idf;
                }
            });
        });

        // All plus-term accumulation has joined; exclusions go through the same shard locks.
        query.minus_terms.par_iter().for_each(|term| {
            if let Some(postings) = index.postings(term) {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            }
        });

        document_to_relevance.into_ordinary_map()
    }

    fn accepts<P>(&self, id: DocumentId, predicate: &P) -> bool
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.stored(id)
            .is_some_and(|doc| predicate(id, doc.status, doc.rating))
    }

    /// Top documents for `raw_query` accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> IndexResult<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query, true)?;
        let mut documents = self.find_all_documents(policy, &query, predicate);
        let matched = documents.len();

        sort_by_relevance(&mut documents, self.config.relevance_epsilon, policy);
        documents.truncate(self.config.max_result_document_count);

        trace!(
            "{policy:?} query {raw_query:?}: {matched} matched, returning {}",
            documents.len()
        );
        Ok(documents)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> IndexResult<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> IndexResult<Vec<Document>> {
        self.find_top_documents_by_status(policy, raw_query, DocumentStatus::Actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(documents: &[Document]) -> Vec<DocumentId> {
        documents.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_sort_ties_by_rating() {
        let mut documents = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.5 + 1e-9, 9),
            Document::new(3, 0.9, 0),
            Document::new(4, 0.5 - 1e-9, 5),
        ];
        sort_by_relevance(&mut documents, 1e-6, ExecutionPolicy::Sequential);
        assert_eq!(ids(&documents), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_sort_equal_rating_falls_back_to_id() {
        let mut documents = vec![
            Document::new(8, 0.25, 3),
            Document::new(2, 0.25, 3),
            Document::new(5, 0.25 + 1e-12, 3),
        ];
        sort_by_relevance(&mut documents, 1e-6, ExecutionPolicy::Parallel);
        assert_eq!(ids(&documents), vec![2, 5, 8]);
    }

    #[test]
    fn test_sort_ties_do_not_chain() {
        let mut documents = vec![
            Document::new(1, 1.0, 0),
            Document::new(2, 1.0 - 0.9e-6, 0),
            Document::new(3, 1.0 - 1.8e-6, 10),
        ];
        sort_by_relevance(&mut documents, 1e-6, ExecutionPolicy::Sequential);
        // 3 is 1.8e-6 behind 1, so its rating cannot lift it
        assert_eq!(ids(&documents), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_chain_keeps_most_relevant_on_top() {
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let mut documents: Vec<Document> = (0..10)
                .map(|id| Document::new(id, 1.0 - f64::from(id) * 0.9e-6, id))
                .collect();
            sort_by_relevance(&mut documents, 1e-6, policy);
            documents.truncate(5);
            // groups anchored at 0, 2, 4: {0, 1}, {2, 3}, {4, 5}
            assert_eq!(ids(&documents), vec![1, 0, 3, 2, 5]);
        }
    }

    #[test]
    fn test_sort_distinct_relevance_ignores_rating() {
        let mut documents = vec![Document::new(1, 0.1, 100), Document::new(2, 0.2, -100)];
        sort_by_relevance(&mut documents, 1e-6, ExecutionPolicy::Sequential);
        assert_eq!(ids(&documents), vec![2, 1]);
    }
}
