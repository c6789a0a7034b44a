//! Run many independent queries against one server in parallel.

use rayon::prelude::*;

use crate::types::{Document, ExecutionPolicy, IndexResult};

use super::search_server::SearchServer;

/// Top documents for each query, in query order. Queries run on the rayon
/// pool; each individual ranking runs sequentially. The first malformed query
/// fails the whole batch.
pub fn process_queries<Q>(server: &SearchServer, queries: &[Q]) -> IndexResult<Vec<Vec<Document>>>
where
    Q: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(ExecutionPolicy::Sequential, query.as_ref()))
        .collect()
}

/// Results of [`process_queries`] concatenated into one list, query order kept.
pub fn process_queries_joined<Q>(server: &SearchServer, queries: &[Q]) -> IndexResult<Vec<Document>>
where
    Q: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
