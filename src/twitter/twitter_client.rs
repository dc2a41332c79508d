use super::{oauth::OAuth1Signer, request::TweetRequest, response::TweetResponse};
use crate::{
    config::TwitterConfig,
    http::{HttpClient, ResponseHandler},
    notifier::{NotifyError, Published, Publisher},
};
use reqwest::header::{AUTHORIZATION, USER_AGENT};

const AGENT: &str = "prherald";

pub struct TwitterClient {
    http: HttpClient,
    api_url: String,
    signer: OAuth1Signer,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Self {
        TwitterClient {
            http: HttpClient::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            signer: OAuth1Signer::new(config.credentials.to_owned()),
        }
    }

    pub async fn create_tweet(&self, text: &str) -> Result<TweetResponse, NotifyError> {
        let uri = format!("{}/2/tweets", self.api_url);
        let authorization = self
            .signer
            .authorization_header("POST", &uri, &[])
            .map_err(|_| NotifyError::Signing)?;

        let response = self
            .http
            .post(&uri)
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, AGENT)
            .json(&TweetRequest::new(text))
            .send()
            .await
            .handle::<TweetResponse>()
            .await
            .map_err(|cause| {
                if cause.status() == Some(429) {
                    log::warn!("rate limited by {}", self.api_url);
                }
                NotifyError::Publish { cause }
            })?;

        Ok(response.payload)
    }
}

impl Publisher for TwitterClient {
    async fn post(&self, text: &str) -> Result<Published, NotifyError> {
        log::debug!("posting {} character(s)", text.chars().count());
        let tweet = self.create_tweet(text).await?;
        log::info!("Posted tweet {}", tweet.data.id);
        log::debug!("tweet text: {}", tweet.data.text);

        Ok(Published {
            id: Some(tweet.data.id),
        })
    }
}
