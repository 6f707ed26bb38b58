/// Consumer-facing project operations
///
/// Thin orchestration over a [`ProjectSource`]: single-record operations pass
/// through unchanged (and surface every failure), while the pagination-aware
/// helpers reuse the recommender's batch fetching.
use crate::{
    error::{ClientError, ClientResult},
    models::{
        Milestone, NewProject, ProjectDocument, ProjectMember, ProjectPage, ProjectRecord,
        ProjectUpdate,
    },
    services::{
        providers::ProjectSource,
        recommendations::{Recommender, Strategy},
    },
};
use std::sync::Arc;

pub struct ProjectService {
    source: Arc<dyn ProjectSource>,
    recommender: Recommender,
}

impl ProjectService {
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        let recommender = Recommender::new(Arc::clone(&source));
        Self {
            source,
            recommender,
        }
    }

    pub async fn get_projects(&self, page: u32) -> ClientResult<ProjectPage> {
        self.source.fetch_page(page).await
    }

    pub async fn get_projects_by_status(
        &self,
        status: &str,
        page: u32,
    ) -> ClientResult<ProjectPage> {
        self.source.fetch_page_by_status(status, page).await
    }

    /// Up to `max_count` randomly selected projects, active ones preferred.
    /// An empty result means nothing is available right now; it is not an
    /// error and callers must not retry on it.
    pub async fn get_recommended_projects(
        &self,
        max_count: usize,
        strategy: Strategy,
    ) -> ClientResult<Vec<ProjectRecord>> {
        self.recommender.recommend(max_count, strategy).await
    }

    pub async fn get_project(&self, project_id: &str) -> ClientResult<ProjectRecord> {
        self.require_id(project_id)?;
        self.source.fetch_by_id(project_id).await
    }

    /// Projects the session's user belongs to, resolved by the backend from
    /// the bearer token.
    pub async fn get_user_projects(&self) -> ClientResult<Vec<ProjectRecord>> {
        self.source.fetch_user_projects().await
    }

    pub async fn create_project(&self, project: &NewProject) -> ClientResult<ProjectRecord> {
        if project.title.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Project title cannot be empty".to_string(),
            ));
        }
        self.source.create(project).await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        update: &ProjectUpdate,
    ) -> ClientResult<ProjectRecord> {
        self.require_id(project_id)?;
        self.source.update(project_id, update).await
    }

    pub async fn delete_project(&self, project_id: &str) -> ClientResult<()> {
        self.require_id(project_id)?;
        self.source.delete(project_id).await
    }

    pub async fn get_project_milestones(&self, project_id: &str) -> ClientResult<Vec<Milestone>> {
        self.require_id(project_id)?;
        self.source.fetch_milestones(project_id).await
    }

    pub async fn get_project_documents(
        &self,
        project_id: &str,
    ) -> ClientResult<Vec<ProjectDocument>> {
        self.require_id(project_id)?;
        self.source.fetch_documents(project_id).await
    }

    pub async fn get_project_members(
        &self,
        project_id: &str,
    ) -> ClientResult<Vec<ProjectMember>> {
        self.require_id(project_id)?;
        self.source.fetch_members(project_id).await
    }

    /// Every active project across the whole backend. Page 1 is mandatory;
    /// the remaining pages are fetched concurrently and a failed page drops
    /// out of the total rather than failing the call.
    pub async fn get_all_active_projects(&self) -> ClientResult<Vec<ProjectRecord>> {
        let first = self.source.fetch_page(1).await?;
        let max_page = first.max_page.max(1);

        let mut active: Vec<ProjectRecord> = first
            .records
            .into_iter()
            .filter(ProjectRecord::is_active)
            .collect();

        if max_page > 1 {
            let rest = self.recommender.fetch_batch((2..=max_page).collect()).await;
            active.extend(rest.into_iter().filter(ProjectRecord::is_active));
        }

        tracing::info!(active = active.len(), max_page, "Collected active projects");
        Ok(active)
    }

    fn require_id(&self, project_id: &str) -> ClientResult<()> {
        if project_id.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Project id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
