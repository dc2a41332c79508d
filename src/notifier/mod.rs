mod dry_run;
mod gate;
mod message;
pub mod template;

use crate::{
    config::{NotifierConfig, RepositoryConfig},
    http,
    snapshot::PullRequestRecord,
};
pub use dry_run::DryRunPublisher;
use gate::MinIntervalGate;
use handlebars::{RenderError, TemplateError};
use message::MessageRenderer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to render message")]
    Render {
        #[source]
        cause: RenderError,
    },
    #[error("Failed to sign request")]
    Signing,
    #[error("Failed to publish message")]
    Publish {
        #[source]
        cause: http::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Platform id of the created post, absent when nothing was sent.
    pub id: Option<String>,
}

/// Somewhere a rendered announcement can be posted.
pub trait Publisher {
    async fn post(&self, text: &str) -> Result<Published, NotifyError>;
}

pub struct Notifier<P: Publisher> {
    publisher: P,
    renderer: MessageRenderer,
    gate: MinIntervalGate,
}

impl<P: Publisher> Notifier<P> {
    pub fn new(
        publisher: P,
        config: &NotifierConfig,
        repository: &RepositoryConfig,
    ) -> Result<Self, TemplateError> {
        let renderer = MessageRenderer::new(
            config.template.as_deref(),
            &repository.owner,
            &repository.repo,
            config.max_length,
        )?;

        Ok(Notifier {
            publisher,
            renderer,
            gate: MinIntervalGate::new(config.delay()),
        })
    }

    /// Renders and posts one announcement. A failed attempt still counts
    /// towards the interval between publishes.
    pub async fn publish(&mut self, record: &PullRequestRecord) -> Result<Published, NotifyError> {
        let text = self
            .renderer
            .render(record)
            .map_err(|cause| NotifyError::Render { cause })?;

        self.gate.wait().await;
        let result = self.publisher.post(&text).await;
        self.gate.mark();

        result
    }
}
