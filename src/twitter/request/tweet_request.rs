use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TweetRequest<'a> {
    pub text: &'a str,
}

impl<'a> TweetRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}
