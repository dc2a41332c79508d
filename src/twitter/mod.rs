mod oauth;
mod request;
mod response;
pub mod twitter_client;

pub use twitter_client::TwitterClient;
