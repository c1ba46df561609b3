//! Application state - shared across all handlers.

use blog_core::Aggregator;
use blog_infra::{BlogRepositories, InMemoryBlogStore};
use std::sync::Arc;

use crate::config::{AppConfig, PageLimits};
use crate::presenter::Presenter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub presenter: Presenter,
    pub pages: PageLimits,
}

impl AppState {
    /// Build the application state for the configured storage engine.
    ///
    /// A configured database that cannot be reached is a startup failure.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repositories = Self::repositories(config).await?;
        let presenter = Presenter::new(config.media_url.clone());

        tracing::info!("Application state initialized");

        Ok(Self::from_repositories(repositories, presenter, config.pages))
    }

    pub fn from_repositories(
        repositories: BlogRepositories,
        presenter: Presenter,
        pages: PageLimits,
    ) -> Self {
        Self {
            aggregator: repositories.aggregator(),
            presenter,
            pages,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> anyhow::Result<BlogRepositories> {
        match &config.database {
            Some(db_config) => {
                let conn = blog_infra::database::connect(db_config).await?;
                Ok(BlogRepositories::postgres(conn))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Serving from an empty in-memory store.");
                Ok(BlogRepositories::in_memory(Arc::new(InMemoryBlogStore::new())))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(config: &AppConfig) -> anyhow::Result<BlogRepositories> {
        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
        }
        tracing::info!("Running without postgres feature - using in-memory store");
        Ok(BlogRepositories::in_memory(Arc::new(InMemoryBlogStore::new())))
    }
}
