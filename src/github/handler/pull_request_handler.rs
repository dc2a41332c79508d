use crate::{
    github::{github_client::GithubClient, response::PullRequest},
    http,
};

const OPEN: &str = "open";

pub struct PullRequestHandler<'a> {
    client: &'a GithubClient,
    owner: String,
    repo: String,
}

impl<'a> PullRequestHandler<'a> {
    pub fn new(client: &'a GithubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        PullRequestHandler {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Every open pull request, across all pages of the listing.
    pub async fn open(&self) -> Result<Vec<PullRequest>, http::Error> {
        self.client
            .list_pull_requests(&self.owner, &self.repo, OPEN)
            .await
    }
}
