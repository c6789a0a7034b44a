//! docrank: an in-memory TF-IDF document index.
//!
//! Documents are tokenized on spaces, stop words are dropped, and each
//! remaining term is stored with its normalized term frequency in two mirrored
//! indexes (term → documents, document → terms). Queries are ranked by
//! TF-IDF, filtered by a caller predicate, and cut to the top results.
//! Every ranking operation takes an [`ExecutionPolicy`]; the parallel policy
//! fans work out over rayon and aggregates through a sharded
//! [`ConcurrentMap`], producing the same results as the sequential one.
//!
//! ```
//! use docrank::{DocumentStatus, ExecutionPolicy, SearchServer};
//!
//! let mut server = SearchServer::from_stop_words_text("and with").unwrap();
//! server.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//! server.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//!
//! let top = server.find_top_documents(ExecutionPolicy::Parallel, "curly pet").unwrap();
//! assert_eq!(top[0].id, 2);
//! ```

pub mod corpus;
pub mod engine;
pub mod index;
pub mod types;

pub use corpus::{index_corpus, load_corpus, parse_corpus, DocumentRecord};
pub use engine::{
    paginate, parse_query, process_queries, process_queries_joined, remove_duplicates,
    sort_by_relevance, Page, Paginator, ParsedQuery, RequestQueue, SearchServer, Tokenizer,
};
pub use index::{ConcurrentMap, DocumentStore, ShardKey, TermIndex, WordFrequencies};
pub use types::{
    Document, DocumentId, DocumentStatus, ErrorKind, ExecutionPolicy, IndexError, IndexResult,
    SearchConfig,
};
