//! Documents, statuses and ranked results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier. Valid ids are non-negative and never reused.
pub type DocumentId = i32;

/// Caller-assigned document status, fixed when the document is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    /// Parse a status name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "actual" => Some(Self::Actual),
            "irrelevant" => Some(Self::Irrelevant),
            "banned" => Some(Self::Banned),
            "removed" => Some(Self::Removed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Irrelevant => "irrelevant",
            Self::Banned => "banned",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Accumulated TF-IDF relevance.
    pub relevance: f64,
    /// Average rating of the document.
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}
