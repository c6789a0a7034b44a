//! Tests for the helpers built on the public server API: pagination, the
//! request queue, duplicate removal, batch queries and corpus loading.

use std::io::Write;

use docrank::{
    index_corpus, load_corpus, paginate, parse_corpus, process_queries, process_queries_joined,
    remove_duplicates, Document, DocumentStatus, ErrorKind, ExecutionPolicy, RequestQueue,
    SearchServer,
};

// ==================== Helpers ====================

fn collars() -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
    server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
    server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
    server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();
    server
}

// ==================== Paginator Tests ====================

#[test]
fn test_paginate_splits_into_pages() {
    let items: Vec<i32> = (1..=5).collect();
    let pages = paginate(&items, 2);
    assert_eq!(pages.len(), 3);
    let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(pages.iter().last().unwrap().items(), &[5]);
}

#[test]
fn test_paginate_edge_sizes() {
    let items = [1, 2, 3];
    assert!(paginate(&items, 0).is_empty());
    assert_eq!(paginate(&items, 10).len(), 1);
    let empty: [i32; 0] = [];
    assert!(paginate(&empty, 2).is_empty());
}

#[test]
fn test_page_display() {
    let documents = vec![Document::new(2, 0.5, 3), Document::new(4, 0.25, -1)];
    let pages = paginate(&documents, 2);
    let page = pages.iter().next().unwrap();
    assert_eq!(
        page.to_string(),
        "{ document_id = 2, relevance = 0.5, rating = 3 }{ document_id = 4, relevance = 0.25, rating = -1 }"
    );
}

// ==================== Request Queue Tests ====================

#[test]
fn test_request_queue_counts_empty_results_in_window() {
    let server = collars();
    let mut queue = RequestQueue::new(&server);
    for _ in 0..1439 {
        queue.add_find_request("empty request").unwrap();
    }
    assert_eq!(queue.no_result_requests(), 1439);
    queue.add_find_request("curly dog").unwrap();
    assert_eq!(queue.no_result_requests(), 1439);
    queue.add_find_request("big collar").unwrap();
    assert_eq!(queue.no_result_requests(), 1438);
    queue.add_find_request("sparrow").unwrap();
    assert_eq!(queue.no_result_requests(), 1437);
}

#[test]
fn test_request_queue_small_window() {
    let server = collars();
    let mut queue = RequestQueue::with_window(&server, 2);
    queue.add_find_request("nothing").unwrap();
    queue.add_find_request("nothing").unwrap();
    assert_eq!(queue.no_result_requests(), 2);
    let found = queue
        .add_find_request_by_status("cat", DocumentStatus::Actual)
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(queue.no_result_requests(), 1);
    queue
        .add_find_request_with("cat", |_, _, rating| rating > 100)
        .unwrap();
    assert_eq!(queue.no_result_requests(), 1);
}

#[test]
fn test_request_queue_skips_failed_queries() {
    let server = collars();
    let mut queue = RequestQueue::new(&server);
    assert!(queue.add_find_request("--bad").is_err());
    assert_eq!(queue.no_result_requests(), 0);
}

// ==================== Duplicate Removal Tests ====================

#[test]
fn test_remove_duplicates_keeps_lowest_id() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut server = SearchServer::from_stop_words_text("and with").unwrap();
    let docs = [
        (1, "funny pet and nasty rat"),
        (2, "funny pet with curly hair"),
        (3, "funny pet with curly hair"),
        (4, "funny pet and curly hair"),
        (5, "funny funny pet and nasty nasty rat"),
        (6, "funny pet and not very nasty rat"),
        (7, "very nasty rat and not very funny pet"),
        (8, "pet with rat and rat and rat"),
        (9, "nasty rat with curly hair"),
    ];
    for (id, text) in docs {
        server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
    }
    let removed = remove_duplicates(&mut server);
    assert_eq!(removed, vec![3, 4, 5, 7]);
    assert_eq!(server.document_count(), 5);
    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
}

#[test]
fn test_remove_duplicates_without_duplicates() {
    let mut server = collars();
    assert!(remove_duplicates(&mut server).is_empty());
    assert_eq!(server.document_count(), 5);
}

// ==================== Batch Query Tests ====================

#[test]
fn test_process_queries_preserves_order() {
    let server = collars();
    let queries = ["sparrow", "curly", "zebra", "big collar"];
    let results = process_queries(&server, &queries).unwrap();
    assert_eq!(results.len(), 4);
    for (query, documents) in queries.iter().zip(&results) {
        let expected = server
            .find_top_documents(ExecutionPolicy::Sequential, query)
            .unwrap();
        assert_eq!(documents, &expected);
    }
    assert!(results[2].is_empty());
}

#[test]
fn test_process_queries_joined_flattens() {
    let server = collars();
    let queries = vec!["sparrow".to_string(), "curly".to_string()];
    let joined = process_queries_joined(&server, &queries).unwrap();
    let ids: Vec<i32> = joined.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![4, 5, 1, 2]);
}

#[test]
fn test_process_queries_propagates_errors() {
    let server = collars();
    let err = process_queries(&server, &["cat", "-"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ==================== Corpus Tests ====================

#[test]
fn test_load_and_index_corpus() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "text": "white cat fancy collar", "status": "actual", "ratings": [8, -3]}},
            {{"id": 2, "text": "fluffy cat fluffy tail", "status": "banned"}},
            {{"id": 3, "text": "groomed dog expressive eyes", "ratings": [5]}}
        ]"#
    )
    .unwrap();

    let records = load_corpus(file.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].status, DocumentStatus::Banned);
    assert!(records[1].ratings.is_empty());
    assert_eq!(records[2].status, DocumentStatus::Actual);

    let mut server = SearchServer::from_stop_words_text("").unwrap();
    index_corpus(&mut server, &records).unwrap();
    assert_eq!(server.document_count(), 3);
    assert_eq!(server.document_rating(1), Some(2));
    assert_eq!(server.document_status(2), Some(DocumentStatus::Banned));
}

#[test]
fn test_corpus_errors() {
    assert_eq!(parse_corpus("not json").unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        load_corpus("/nonexistent/corpus.json").unwrap_err().kind(),
        ErrorKind::Io
    );

    let records = parse_corpus(r#"[{"id": -4, "text": "x"}]"#).unwrap();
    let mut server = SearchServer::from_stop_words_text("").unwrap();
    assert!(index_corpus(&mut server, &records).is_err());
}
