mod tweet_request;

pub use tweet_request::TweetRequest;
