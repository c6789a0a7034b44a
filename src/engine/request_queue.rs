//! Sliding-window request log counting queries that found nothing.

use std::collections::VecDeque;

use crate::types::{Document, DocumentId, DocumentStatus, ExecutionPolicy, IndexResult};

use super::search_server::SearchServer;

/// Window length in ticks: one tick per request, a day of minutes.
pub const DEFAULT_WINDOW: u64 = 1440;

struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Wraps a [`SearchServer`] and records how many of the most recent requests
/// returned no documents.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
    window: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, DEFAULT_WINDOW)
    }

    /// A queue remembering the last `window` requests.
    pub fn with_window(server: &'a SearchServer, window: u64) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            no_result_requests: 0,
            current_time: 0,
            window,
        }
    }

    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> IndexResult<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let documents =
            self.server
                .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)?;
        self.record(documents.len());
        Ok(documents)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> IndexResult<Vec<Document>> {
        let documents =
            self.server
                .find_top_documents_by_status(ExecutionPolicy::Sequential, raw_query, status)?;
        self.record(documents.len());
        Ok(documents)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> IndexResult<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(front) = self.requests.front() {
            if self.current_time - front.timestamp < self.window {
                break;
            }
            if front.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }

        self.requests.push_back(QueryResult {
            timestamp: self.current_time,
            results,
        });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}
