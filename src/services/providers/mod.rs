/// Project data source abstraction
///
/// The backend is reached through this trait so the aggregation logic can be
/// exercised against scripted sources in tests and so an alternative
/// transport can be dropped in without touching the services. The REST
/// implementation lives in [`rest`].
use crate::{
    error::ClientResult,
    models::{Milestone, NewProject, ProjectDocument, ProjectMember, ProjectPage, ProjectRecord,
        ProjectUpdate},
};

pub mod rest;

/// Trait for project record sources
///
/// Every page fetch is independently fallible; orchestration layers decide
/// whether a failed page aborts the operation or merely contributes nothing.
/// Single-record operations always surface their errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch one page of project records with pagination metadata.
    ///
    /// `page` is 1-based. The returned metadata (notably `max_page`) drives
    /// how many further pages the caller decides to request.
    async fn fetch_page(&self, page: u32) -> ClientResult<ProjectPage>;

    /// Fetch one page of records matching the given status filter.
    async fn fetch_page_by_status(&self, status: &str, page: u32) -> ClientResult<ProjectPage>;

    /// Fetch a single record; `NotFound` when the backend has no such project.
    async fn fetch_by_id(&self, project_id: &str) -> ClientResult<ProjectRecord>;

    /// Fetch the projects belonging to the session's user. The backend
    /// resolves the user from the bearer token; there is no id parameter.
    async fn fetch_user_projects(&self) -> ClientResult<Vec<ProjectRecord>>;

    async fn create(&self, project: &NewProject) -> ClientResult<ProjectRecord>;

    async fn update(
        &self,
        project_id: &str,
        update: &ProjectUpdate,
    ) -> ClientResult<ProjectRecord>;

    async fn delete(&self, project_id: &str) -> ClientResult<()>;

    async fn fetch_milestones(&self, project_id: &str) -> ClientResult<Vec<Milestone>>;

    async fn fetch_documents(&self, project_id: &str) -> ClientResult<Vec<ProjectDocument>>;

    async fn fetch_members(&self, project_id: &str) -> ClientResult<Vec<ProjectMember>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
