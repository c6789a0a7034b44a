//! JSON corpus files: an array of documents to load into a server.
//!
//! ```json
//! [
//!   { "id": 1, "text": "funny pet and nasty rat", "status": "actual", "ratings": [7, 2, 7] }
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::SearchServer;
use crate::types::{DocumentId, DocumentStatus, IndexResult};

/// One document as it appears in a corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Parse a corpus from a JSON string.
pub fn parse_corpus(json: &str) -> IndexResult<Vec<DocumentRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a corpus file.
pub fn load_corpus(path: impl AsRef<Path>) -> IndexResult<Vec<DocumentRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Add every record to `server`, stopping at the first rejected document.
pub fn index_corpus(server: &mut SearchServer, records: &[DocumentRecord]) -> IndexResult<()> {
    for record in records {
        server.add_document(record.id, &record.text, record.status, &record.ratings)?;
    }
    log::debug!("indexed {} corpus documents", records.len());
    Ok(())
}
