//! Query engine: tokenizing, parsing, ranking and matching, plus the helpers
//! that drive a [`SearchServer`] from the outside.

pub mod batch;
pub mod maintenance;
pub mod matching;
pub mod paginator;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod search_server;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use maintenance::remove_duplicates;
pub use paginator::{paginate, Page, Paginator};
pub use query::{parse_query, ParsedQuery, MINUS_MARKER};
pub use ranking::sort_by_relevance;
pub use request_queue::RequestQueue;
pub use search_server::SearchServer;
pub use tokenizer::{is_valid_word, split_into_words, Tokenizer};
