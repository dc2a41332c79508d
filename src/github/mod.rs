pub mod github_client;
mod handler;
mod headers;
mod pagination;
mod response;

use crate::{
    config::Config,
    herald::Source,
    http,
    snapshot::{PullRequestRecord, Snapshot},
};
use github_client::GithubClient;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to fetch open pull requests for {owner}/{repo}")]
pub struct FetchError {
    pub owner: String,
    pub repo: String,
    #[source]
    pub cause: http::Error,
}

/// Open pull requests of the configured repository.
pub struct GithubSource {
    client: GithubClient,
    owner: String,
    repo: String,
}

impl GithubSource {
    pub fn new(config: &Config) -> Self {
        GithubSource {
            client: GithubClient::new(&config.github),
            owner: config.repository.owner.to_owned(),
            repo: config.repository.repo.to_owned(),
        }
    }
}

impl Source for GithubSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let pulls = self
            .client
            .repo(&self.owner, &self.repo)
            .pull_requests()
            .open()
            .await
            .map_err(|cause| FetchError {
                owner: self.owner.to_owned(),
                repo: self.repo.to_owned(),
                cause,
            })?;

        let snapshot: Snapshot = pulls
            .into_iter()
            .map(|pull| (pull.id, PullRequestRecord::from(pull)))
            .collect();

        Ok(snapshot)
    }
}
