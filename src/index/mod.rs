//! Index structures: document storage, the mirrored term index, and the
//! sharded map used for parallel aggregation.

pub mod concurrent_map;
pub mod document_store;
pub mod term_index;

pub use concurrent_map::{ConcurrentMap, ShardKey};
pub use document_store::{compute_average_rating, DocumentIds, DocumentStore, StoredDocument};
pub use term_index::{TermIndex, WordFrequencies};
