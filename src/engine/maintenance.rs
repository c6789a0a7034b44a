//! Index maintenance: duplicate-document removal.

use std::collections::HashMap;

use log::info;

use crate::index::term_index::Term;
use crate::types::DocumentId;

use super::search_server::SearchServer;

/// Remove documents whose set of words equals that of a document with a
/// lower id. Term frequencies are ignored; only which words occur matters.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut first_with_words: HashMap<Vec<Term>, DocumentId> = HashMap::new();
    let mut duplicates = Vec::new();

    // Ids come in ascending order, so the first owner of a word set is the lowest id.
    for id in server.document_ids() {
        let words: Vec<Term> = server.word_frequencies(id).keys().cloned().collect();
        if first_with_words.contains_key(&words) {
            duplicates.push(id);
        } else {
            first_with_words.insert(words, id);
        }
    }

    for &id in &duplicates {
        info!("Found duplicate document id {id}");
        server.remove_document(id);
    }
    duplicates
}
