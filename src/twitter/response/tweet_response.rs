use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TweetResponse {
    pub data: TweetData,
}

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
}
