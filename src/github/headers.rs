use reqwest::{
    header::{ACCEPT, USER_AGENT},
    RequestBuilder,
};

pub const API_VERSION: &str = "2022-11-28";
pub const AGENT: &str = "prherald";

pub trait Headers {
    fn default_headers(self, token: Option<&str>) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn default_headers(self, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(USER_AGENT, AGENT);

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClient;
    use anyhow::Result;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn should_send_github_headers_with_token() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("authorization", "Bearer test_token")
            .match_header("accept", "application/vnd.github+json")
            .match_header("x-github-api-version", "2022-11-28")
            .match_header("user-agent", "prherald")
            .with_body("ok")
            .create_async()
            .await;

        HttpClient::new()
            .get(server.url())
            .default_headers(Some("test_token"))
            .send()
            .await?;

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn should_omit_authorization_without_token() -> Result<()> {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("authorization", Matcher::Missing)
            .match_header("user-agent", "prherald")
            .with_body("ok")
            .create_async()
            .await;

        HttpClient::new()
            .get(server.url())
            .default_headers(None)
            .send()
            .await?;

        mock.assert_async().await;
        Ok(())
    }
}
