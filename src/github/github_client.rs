use super::{headers::Headers, pagination::next_link, response::PullRequest};
use crate::{
    config::GithubConfig,
    http::{self, HttpClient, ResponseHandler},
};

const PER_PAGE: u32 = 100;

pub struct GithubClient {
    http: HttpClient,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        GithubClient {
            http: HttpClient::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            token: config.token.to_owned(),
        }
    }

    pub(super) async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
    ) -> Result<Vec<PullRequest>, http::Error> {
        let mut uri = format!(
            "{}/repos/{}/{}/pulls?state={}&per_page={}&page=1",
            self.api_url, owner, repo, state, PER_PAGE
        );
        log::info!("Pulling pull requests from {}", uri);

        let mut pulls = Vec::new();
        loop {
            let page = self
                .http
                .get(&uri)
                .default_headers(self.token.as_deref())
                .send()
                .await
                .handle::<Vec<PullRequest>>()
                .await?;

            log::debug!(
                "{} returned {} with {} pull request(s)",
                uri,
                page.status,
                page.payload.len()
            );
            pulls.extend(page.payload);

            match next_link(&page.headers) {
                Some(next) if self.is_api_url(&next) => uri = next,
                Some(next) => {
                    return Err(http::Error::ForeignLinkError {
                        url: next,
                        base: self.api_url.to_owned(),
                    })
                }
                None => break,
            }
        }

        Ok(pulls)
    }

    /// The token is only ever sent back to the configured API host.
    fn is_api_url(&self, url: &str) -> bool {
        url.strip_prefix(&self.api_url)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}
