use crate::snapshot::PullRequestRecord;
use serde::Deserialize;

/// The subset of a GitHub pull request listing item that gets announced.
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub created_at: String,
    pub user: User,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Links {
    pub html: Href,
}

#[derive(Debug, Deserialize)]
pub struct Href {
    pub href: String,
}

impl From<PullRequest> for PullRequestRecord {
    fn from(value: PullRequest) -> Self {
        PullRequestRecord {
            title: value.title,
            number: value.number,
            url: value.links.html.href,
            author: value.user.html_url,
            created_at: value.created_at,
        }
    }
}
