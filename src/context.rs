//! Application context.
//!
//! Built once at startup and passed explicitly to whatever needs the
//! session, the API client or metrics. There is no ambient state.

use crate::api::{ApiError, HttpClient, SessionStore};
use crate::config::{ConfigError, FileConfig};
use crate::matches::MatchResultsView;
use crate::metrics::{ClientMetrics, MetricsError};
use crate::wizard::SubmissionController;
use thiserror::Error;

/// Errors raised while starting the application.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Metrics registration failed.
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
    /// The API client could not be built.
    #[error("API client error: {0}")]
    Api(#[from] ApiError),
}

/// Shared services for one application run.
pub struct AppContext {
    config: FileConfig,
    session: SessionStore,
    metrics: ClientMetrics,
    client: HttpClient,
}

impl AppContext {
    /// Validates configuration and builds the session store, metrics
    /// registry and API client.
    pub fn init(config: FileConfig) -> Result<Self, ContextError> {
        config.validate()?;

        let session = SessionStore::new();
        let metrics = ClientMetrics::new()?;
        let client = HttpClient::new(&config.api, session.clone(), metrics.clone())?;

        tracing::info!(api = %config.api.root(), "Application context initialized");

        Ok(Self {
            config,
            session,
            metrics,
            client,
        })
    }

    /// Validated configuration.
    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    /// Session store shared with the client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Request counters.
    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    /// The API client.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// A fresh wizard using the configured upload file name.
    pub fn new_wizard(&self) -> SubmissionController {
        SubmissionController::new(self.config.submission.image_filename.clone())
    }

    /// A fresh match view pointing at the configured image CDN.
    pub fn new_match_view(&self) -> MatchResultsView {
        MatchResultsView::new(self.config.api.image_cdn_base.clone())
    }

    /// Forgets the session and releases the context.
    pub async fn shutdown(self) {
        self.session.clear().await;
        tracing::info!("Application context shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crate::wizard::WizardStep;

    #[test]
    fn test_init_with_defaults() {
        let context = AppContext::init(FileConfig::default()).unwrap();

        let wizard = context.new_wizard();
        assert_eq!(wizard.step(), WizardStep::Intro);

        let view = context.new_match_view();
        assert_eq!(
            view.image_url("a/b.jpg"),
            "https://lumetryphotoshare.s3.us-east-2.amazonaws.com/a/b.jpg"
        );
    }

    #[test]
    fn test_init_rejects_bad_config() {
        let mut config = FileConfig::default();
        config.capture.width = 0;
        assert!(matches!(
            AppContext::init(config),
            Err(ContextError::Config(ConfigError::InvalidDimensions))
        ));
    }

    #[tokio::test]
    async fn test_client_shares_session_with_context() {
        let context = AppContext::init(FileConfig::default()).unwrap();
        context.client().session().authenticate(User::default()).await;
        assert!(context.session().is_authenticated().await);

        let session = context.session().clone();
        context.shutdown().await;
        assert!(!session.is_authenticated().await);
    }
}
