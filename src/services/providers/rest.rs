/// REST implementation of the project source
///
/// Talks to the platform backend over HTTP with the session's bearer token.
/// Every response envelope is normalized here, once; nothing downstream
/// inspects raw payloads.
use crate::{
    config::Config,
    error::{ClientError, ClientResult},
    models::{
        DocumentListEnvelope, ListEnvelope, Milestone, NewProject, PageEnvelope, ProjectDocument,
        ProjectMember, ProjectPage, ProjectRecord, ProjectUpdate, RecordEnvelope,
    },
    services::providers::ProjectSource,
    session::Session,
};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use std::time::Duration;

#[derive(Clone)]
pub struct RestProjectSource {
    http_client: HttpClient,
    base_url: String,
    session: Session,
}

impl RestProjectSource {
    pub fn new(config: &Config, session: Session) -> ClientResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Non-success statuses become `Api` errors carrying the body; 404 on
    /// record endpoints is mapped to `NotFound` by the caller beforehand.
    async fn ensure_success(&self, response: Response) -> ClientResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Backend request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_record(&self, path: &str, project_id: &str) -> ClientResult<ProjectRecord> {
        let response = self
            .authorize(self.http_client.get(self.endpoint(path)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("project {}", project_id)));
        }

        let response = self.ensure_success(response).await?;
        let envelope: RecordEnvelope<ProjectRecord> = response.json().await?;
        Ok(envelope.data)
    }

    /// Builds the paginated listing request. Query parameters go through
    /// reqwest's encoder, so a status filter containing spaces or `&` stays a
    /// single parameter value.
    fn page_request(&self, status: Option<&str>, page: u32) -> RequestBuilder {
        let mut request = self
            .http_client
            .get(self.endpoint("/api/projects"))
            .query(&[("page", page.to_string())]);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        self.authorize(request)
    }

    async fn get_page(
        &self,
        request: RequestBuilder,
        requested_page: u32,
    ) -> ClientResult<ProjectPage> {
        let response = request.send().await?;
        let response = self.ensure_success(response).await?;

        let envelope: PageEnvelope = response.json().await?;
        let page = envelope.into_page(requested_page);

        tracing::debug!(
            page = page.page,
            records = page.records.len(),
            max_page = page.max_page,
            count = page.count,
            "Project page fetched"
        );

        Ok(page)
    }
}

#[async_trait::async_trait]
impl ProjectSource for RestProjectSource {
    async fn fetch_page(&self, page: u32) -> ClientResult<ProjectPage> {
        if page == 0 {
            return Err(ClientError::InvalidInput(
                "Page numbers start at 1".to_string(),
            ));
        }
        self.get_page(self.page_request(None, page), page).await
    }

    async fn fetch_page_by_status(&self, status: &str, page: u32) -> ClientResult<ProjectPage> {
        if status.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "Status filter cannot be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(ClientError::InvalidInput(
                "Page numbers start at 1".to_string(),
            ));
        }
        self.get_page(self.page_request(Some(status), page), page)
            .await
    }

    async fn fetch_by_id(&self, project_id: &str) -> ClientResult<ProjectRecord> {
        self.get_record(&format!("/api/project/{}", project_id), project_id)
            .await
    }

    async fn fetch_user_projects(&self) -> ClientResult<Vec<ProjectRecord>> {
        let response = self
            .authorize(self.http_client.get(self.endpoint("/api/user/projects")))
            .send()
            .await?;
        let response = self.ensure_success(response).await?;

        let envelope: ListEnvelope<ProjectRecord> = response.json().await?;
        tracing::debug!(records = envelope.data.len(), "User projects fetched");
        Ok(envelope.data)
    }

    async fn create(&self, project: &NewProject) -> ClientResult<ProjectRecord> {
        let response = self
            .authorize(self.http_client.post(self.endpoint("/api/project")))
            .json(project)
            .send()
            .await?;
        let response = self.ensure_success(response).await?;

        let envelope: RecordEnvelope<ProjectRecord> = response.json().await?;
        tracing::info!(project_id = %envelope.data.project_id, "Project created");
        Ok(envelope.data)
    }

    async fn update(
        &self,
        project_id: &str,
        update: &ProjectUpdate,
    ) -> ClientResult<ProjectRecord> {
        // Singular vs plural paths mirror the backend's actual routing.
        let response = self
            .authorize(
                self.http_client
                    .put(self.endpoint(&format!("/api/projects/{}", project_id))),
            )
            .json(update)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("project {}", project_id)));
        }

        let response = self.ensure_success(response).await?;
        let envelope: RecordEnvelope<ProjectRecord> = response.json().await?;
        tracing::info!(project_id = %project_id, "Project updated");
        Ok(envelope.data)
    }

    async fn delete(&self, project_id: &str) -> ClientResult<()> {
        let response = self
            .authorize(
                self.http_client
                    .delete(self.endpoint(&format!("/api/projects/{}", project_id))),
            )
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("project {}", project_id)));
        }

        self.ensure_success(response).await?;
        tracing::info!(project_id = %project_id, "Project deleted");
        Ok(())
    }

    async fn fetch_milestones(&self, project_id: &str) -> ClientResult<Vec<Milestone>> {
        let response = self
            .authorize(
                self.http_client
                    .get(self.endpoint(&format!("/api/project/{}/milestones", project_id))),
            )
            .send()
            .await?;
        let response = self.ensure_success(response).await?;

        let envelope: ListEnvelope<Milestone> = response.json().await?;
        Ok(envelope.data)
    }

    async fn fetch_documents(&self, project_id: &str) -> ClientResult<Vec<ProjectDocument>> {
        let response = self
            .authorize(
                self.http_client
                    .get(self.endpoint(&format!("/api/project/{}/documents", project_id))),
            )
            .send()
            .await?;
        let response = self.ensure_success(response).await?;

        let envelope: DocumentListEnvelope = response.json().await?;
        Ok(envelope.data.documents)
    }

    async fn fetch_members(&self, project_id: &str) -> ClientResult<Vec<ProjectMember>> {
        let response = self
            .authorize(
                self.http_client
                    .get(self.endpoint(&format!("/api/project/{}/members", project_id))),
            )
            .send()
            .await?;
        let response = self.ensure_success(response).await?;

        let envelope: ListEnvelope<ProjectMember> = response.json().await?;
        Ok(envelope.data)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}
