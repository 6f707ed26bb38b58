use serde::{Deserialize, Serialize};

/// Status value that marks a project as no longer recruiting
pub const COMPLETED_STATUS: &str = "COMPLETED";

const UNTITLED_PLACEHOLDER: &str = "Untitled Project";

/// A project record as served by the backend.
///
/// Only the identifier is required; the backend fills the rest in
/// inconsistently, so everything else is optional and normalized on access.
/// Dates are opaque passthrough strings, never parsed by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRecord {
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ProjectRecord {
    /// A project counts as completed only when its status says exactly
    /// `COMPLETED`, compared case-insensitively with no trimming: stray
    /// whitespace makes it some other status, hence active. Missing or empty
    /// status means the record is still active.
    pub fn is_completed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.to_uppercase() == COMPLETED_STATUS)
    }

    pub fn is_active(&self) -> bool {
        !self.is_completed()
    }

    /// Title with the placeholder applied for records missing one.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => UNTITLED_PLACEHOLDER,
        }
    }
}

/// One page of project records plus the backend's pagination metadata.
///
/// Constructed fresh per fetch and immutable afterwards. Record order is only
/// meaningful within the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPage {
    pub records: Vec<ProjectRecord>,
    pub page: u32,
    pub per_page: u32,
    pub max_page: u32,
    pub count: u64,
}

pub const DEFAULT_PER_PAGE: u32 = 10;

// ============================================================================
// Wire envelopes
// ============================================================================
//
// The backend wraps every response in a `data`/`meta` envelope and omits
// fields freely. Each endpoint gets exactly one envelope shape, normalized
// here; call sites never probe raw payloads.

/// Raw paginated response: `{ "data": [...], "meta": {...} }`
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub data: Option<Vec<ProjectRecord>>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub max_page: Option<u32>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl PageEnvelope {
    /// Normalize the envelope into a `ProjectPage`, substituting defaults for
    /// anything the backend left out. `requested_page` backfills a missing
    /// page number.
    pub fn into_page(self, requested_page: u32) -> ProjectPage {
        let meta = self.meta;
        ProjectPage {
            records: self.data.unwrap_or_default(),
            page: meta
                .as_ref()
                .and_then(|m| m.page)
                .unwrap_or(requested_page),
            per_page: meta
                .as_ref()
                .and_then(|m| m.per_page)
                .unwrap_or(DEFAULT_PER_PAGE),
            max_page: meta.as_ref().and_then(|m| m.max_page).unwrap_or(1).max(1),
            count: meta.as_ref().and_then(|m| m.count).unwrap_or(0),
        }
    }
}

/// Raw single-record response: `{ "data": {...} }`
#[derive(Debug, Deserialize)]
pub struct RecordEnvelope<T> {
    pub data: T,
}

/// Raw list response: `{ "data": [...] }`
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Raw document-list response nests one level deeper:
/// `{ "data": { "documents": [...] } }`
#[derive(Debug, Deserialize)]
pub struct DocumentListEnvelope {
    pub data: DocumentList,
}

#[derive(Debug, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
}

// ============================================================================
// Related resources
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub milestone_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDocument {
    pub document_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMember {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

// ============================================================================
// Mutation payloads
// ============================================================================

/// Payload for creating a project
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Partial update payload; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
