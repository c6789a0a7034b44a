//! Query parsing: raw text into deduplicated plus- and minus-terms.

use crate::types::{IndexError, IndexResult};

use super::tokenizer::{is_valid_word, split_into_words, Tokenizer};

/// Prefix marking a term that must not appear in matching documents.
pub const MINUS_MARKER: char = '-';

/// A parsed query. Terms borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery<'q> {
    /// Terms that contribute relevance.
    pub plus_terms: Vec<&'q str>,
    /// Terms that exclude a document outright.
    pub minus_terms: Vec<&'q str>,
}

impl ParsedQuery<'_> {
    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}

struct QueryWord<'q> {
    data: &'q str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'q>(tokenizer: &Tokenizer, text: &'q str) -> IndexResult<QueryWord<'q>> {
    let (data, is_minus) = match text.strip_prefix(MINUS_MARKER) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with(MINUS_MARKER) || !is_valid_word(data) {
        return Err(IndexError::InvalidQueryWord(text.to_string()));
    }
    Ok(QueryWord {
        data,
        is_minus,
        is_stop: tokenizer.is_stop_word(data),
    })
}

fn sort_unique(terms: &mut Vec<&str>) {
    terms.sort_unstable();
    terms.dedup();
}

/// Parse a raw query.
///
/// With `dedupe`, plus- and minus-terms are each sorted and deduplicated;
/// without it they keep query order. A term given both bare and with the
/// minus marker is kept only as a minus-term.
pub fn parse_query<'q>(
    tokenizer: &Tokenizer,
    text: &'q str,
    dedupe: bool,
) -> IndexResult<ParsedQuery<'q>> {
    let mut query = ParsedQuery::default();
    for word in split_into_words(text) {
        let query_word = parse_query_word(tokenizer, word)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_terms.push(query_word.data);
        } else {
            query.plus_terms.push(query_word.data);
        }
    }

    if dedupe {
        sort_unique(&mut query.plus_terms);
        sort_unique(&mut query.minus_terms);
    }
    if !query.minus_terms.is_empty() {
        let minus_terms = &query.minus_terms;
        query.plus_terms.retain(|term| !minus_terms.contains(term));
    }

    Ok(query)
}
