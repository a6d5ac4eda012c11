//! HTTP server for the Chai website.
//!
//! This crate provides the axum server, serving:
//! - Standalone pages (raw HTML views or markdown documents)
//! - Documentation groups with an aside tree and bottom navigation
//! - SCSS stylesheets compiled on demand under `/static/scss/`
//! - Static assets from the site's `static` directory
//! - The guide exercise API
//!
//! # Quick Start
//!
//! ```ignore
//! use chai_config::Config;
//! use chai_server::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     run_server(&config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (chai-server)
//!                        │
//!                        ├─► Pages, groups ──► DocsCatalog (chai-docs)
//!                        │                          └─► MarkdownRenderer + minijinja
//!                        │
//!                        ├─► /static/scss ──► StylePipeline (chai-styles)
//!                        │
//!                        ├─► /static ──► tower-http ServeDir
//!                        │
//!                        └─► /api/guide/exercise ──► ExerciseService (chai-exercises)
//! ```

mod app;
mod error;
mod handlers;
mod state;
mod templates;

use std::sync::Arc;
use std::time::Duration;

use chai_config::{Config, GroupConfig, LayoutKind, OutputStyle};
use chai_docs::{ContentError, DocGroup, GroupLayout, GroupSpec};
use chai_exercises::{ExerciseService, HttpFetcher};
use chai_renderer::MarkdownRenderer;
use chai_storage::{FsStorage, Storage};
use chai_styles::{GrassCompiler, StylePipeline};
use state::{AppState, GroupPage};

pub use error::ServerError;
pub use templates::TemplateError;
use templates::Templates;

/// Error preventing the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A documentation group failed to build.
    #[error("documentation group `{slug}` is invalid: {source}")]
    Content {
        /// Group slug.
        slug: String,
        /// Build failure.
        #[source]
        source: ContentError,
    },
    /// Templates failed to load.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// The listener could not be bound or the server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a configured group into the layout-aware group description.
#[must_use]
pub fn group_spec(config: &GroupConfig) -> GroupSpec {
    let layout = match config.layout {
        LayoutKind::Sectioned => GroupLayout::Sectioned,
        LayoutKind::Flat => GroupLayout::Flat,
        LayoutKind::Nested => GroupLayout::Nested {
            file: config.file.clone().unwrap_or_default(),
        },
    };
    GroupSpec::new(&config.slug, &config.name, layout)
        .with_route(config.route())
        .with_attachments(config.attachments.clone())
}

/// Stylesheet pipeline over the site's `static/scss` and `static/dist`.
#[must_use]
pub fn style_pipeline(config: &Config) -> StylePipeline {
    let scss_dir = config.site_resolved.scss_dir();
    let style = match config.styles.output_style {
        OutputStyle::Expanded => chai_styles::OutputStyle::Expanded,
        OutputStyle::Compressed => chai_styles::OutputStyle::Compressed,
    };

    StylePipeline::new(
        Arc::new(FsStorage::new(scss_dir.clone())),
        Arc::new(FsStorage::new(config.site_resolved.dist_dir())),
        Arc::new(GrassCompiler::new(scss_dir).with_style(style)),
    )
}

/// Build the shared state: every group's navigation, the templates, the
/// stylesheet pipeline and the exercise service.
fn build_state(config: &Config) -> Result<AppState, StartupError> {
    let site = &config.site_resolved;
    let content: Arc<dyn Storage> = Arc::new(FsStorage::new(site.content_dir.clone()));

    let mut groups = Vec::with_capacity(config.groups.len());
    for group_config in &config.groups {
        let group = DocGroup::load(Arc::clone(&content), group_spec(group_config)).map_err(
            |source| StartupError::Content {
                slug: group_config.slug.clone(),
                source,
            },
        )?;
        tracing::info!(
            group = group.slug(),
            route = %group.spec().route,
            chapters = group.navigation().chapters().len(),
            "Loaded documentation group"
        );
        groups.push(GroupPage {
            group: Arc::new(group),
            template: group_config.template().to_owned(),
            style: group_config.style().to_owned(),
            components: group_config.components.clone(),
        });
    }

    let templates = Templates::load(&FsStorage::new(site.templates_dir.clone()))?;

    let mut renderer = MarkdownRenderer::new();
    if let Some(language) = config.markdown.code_language() {
        renderer = renderer.with_code_language(language);
    }

    let fetcher = HttpFetcher::new(
        &config.exercises.base_url,
        Duration::from_secs(config.exercises.timeout_secs),
    );

    Ok(AppState {
        site_title: site.title.clone(),
        views: Arc::new(FsStorage::new(site.views_dir.clone())),
        renderer,
        templates,
        groups,
        pages: config.pages.clone(),
        styles: style_pipeline(config),
        exercises: ExerciseService::new(
            Arc::clone(&content),
            config.exercises.dir.as_str(),
            Arc::new(fetcher),
        ),
        content,
    })
}

/// Run the server.
///
/// Content is loaded once before the listener binds; a content change
/// requires a restart.
///
/// # Errors
///
/// Returns an error if content or templates fail to load, or the server
/// fails to start.
pub async fn run_server(config: &Config) -> Result<(), StartupError> {
    let state = Arc::new(build_state(config)?);
    let app = app::create_router(state, config.site_resolved.static_dir.clone());

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
