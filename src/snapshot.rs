use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    ops::{Deref, DerefMut},
};

pub type PullRequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub title: String,
    pub number: u64,
    pub url: String,
    pub author: String,
    pub created_at: String,
}

/// All pull requests open at one point in time, keyed by their upstream id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<PullRequestId, PullRequestRecord>);

impl Deref for Snapshot {
    type Target = BTreeMap<PullRequestId, PullRequestRecord>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Snapshot {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(PullRequestId, PullRequestRecord)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PullRequestId, PullRequestRecord)>>(iter: I) -> Self {
        Snapshot(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn record(number: u64, title: &str) -> PullRequestRecord {
        PullRequestRecord {
            title: title.to_owned(),
            number,
            url: format!("https://github.com/owner/repo/pull/{}", number),
            author: "https://github.com/octocat".to_owned(),
            created_at: "2024-01-01T00:00:00Z".to_owned(),
        }
    }

    #[test]
    fn should_serialize_ids_as_object_keys() -> Result<(), Box<dyn std::error::Error>> {
        let snapshot: Snapshot = [(42, record(7, "Add feature"))].into_iter().collect();

        let json = serde_json::to_value(&snapshot)?;

        assert_eq!(json["42"]["number"], 7);
        assert_eq!(json["42"]["title"], "Add feature");
        Ok(())
    }

    #[test]
    fn should_deserialize_string_keys() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "1001": {
                "title": "Fix typo",
                "number": 3,
                "url": "https://github.com/owner/repo/pull/3",
                "author": "https://github.com/octocat",
                "created_at": "2024-02-02T10:00:00Z"
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json)?;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&1001].title, "Fix typo");
        Ok(())
    }
}
