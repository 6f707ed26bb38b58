use projecthub_client::{
    Config, ProjectService, RestProjectSource, Session, Strategy, DEFAULT_MAX_RECOMMENDATIONS,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let session = match config.api_token.clone() {
        Some(token) => Session::authenticated(token),
        None => Session::anonymous(),
    };

    let source = Arc::new(RestProjectSource::new(&config, session)?);
    let service = ProjectService::new(source);

    let recommended = service
        .get_recommended_projects(DEFAULT_MAX_RECOMMENDATIONS, Strategy::Sequential)
        .await?;

    if recommended.is_empty() {
        println!("No recommendations available right now.");
        return Ok(());
    }

    for project in &recommended {
        println!(
            "{}  {}  [{}]",
            project.project_id,
            project.display_title(),
            project.status.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
