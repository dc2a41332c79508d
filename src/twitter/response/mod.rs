mod tweet_response;

pub use tweet_response::TweetResponse;
