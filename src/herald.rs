use crate::{
    cache::SnapshotStore,
    config::Config,
    diff::{diff, Delta},
    github::{FetchError, GithubSource},
    notifier::{Notifier, Publisher},
    snapshot::Snapshot,
};
use anyhow::{Context, Result};
use itertools::Itertools;

/// Where the current set of open pull requests comes from.
pub trait Source {
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Upstream could not be read; the store was left untouched.
    FetchFailed,
    /// No prior state existed; the store now holds the fetched snapshot.
    Seeded { tracked: usize },
    Compared {
        delta: Delta,
        published: usize,
        failed: usize,
    },
}

pub async fn run<P: Publisher>(config: &Config, publisher: P) -> Result<CycleOutcome> {
    let source = GithubSource::new(config);
    let store = SnapshotStore::new(&config.cache.path);
    let mut notifier = Notifier::new(publisher, &config.notifier, &config.repository)
        .context("Cannot compile the message template")?;

    run_cycle(&source, &store, &mut notifier).await
}

/// One fetch → diff → persist → notify pass.
pub async fn run_cycle<S: Source, P: Publisher>(
    source: &S,
    store: &SnapshotStore,
    notifier: &mut Notifier<P>,
) -> Result<CycleOutcome> {
    log::info!("Checking for new pull requests");

    let current = match source.fetch().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("{:#}", anyhow::Error::from(err));
            return Ok(CycleOutcome::FetchFailed);
        }
    };

    let previous = store
        .load()
        .await
        .context("Cannot load the cached snapshot")?;
    let delta = diff(previous.as_ref(), &current);

    store
        .save(&current)
        .await
        .with_context(|| format!("Cannot write {}", store.path().display()))?;

    if previous.is_none() {
        log::info!(
            "No previous snapshot, seeded {} with {} pull request(s)",
            store.path().display(),
            current.len()
        );
        return Ok(CycleOutcome::Seeded {
            tracked: current.len(),
        });
    }

    if !delta.removed.is_empty() {
        log::debug!("no longer open: {}", delta.removed.iter().join(", "));
    }
    if !delta.changed.is_empty() {
        log::debug!("changed: {}", delta.changed.iter().join(", "));
    }

    if delta.is_empty() {
        log::info!("No changes since the last check");
    } else if delta.added.is_empty() {
        log::info!("No new pull requests");
    } else {
        log::info!("{} new pull request(s)!", delta.added.len());
    }

    let mut published = 0;
    let mut failed = 0;
    for (id, record) in delta.added_records(&current) {
        log::info!("Composing message for #{}", record.number);
        match notifier.publish(record).await {
            Ok(post) => {
                published += 1;
                if let Some(id) = post.id {
                    log::debug!("#{} published as {}", record.number, id);
                }
            }
            Err(err) => {
                failed += 1;
                log::error!(
                    "Cannot announce #{} ({}): {:#}",
                    record.number,
                    id,
                    anyhow::Error::from(err)
                );
            }
        }
    }

    Ok(CycleOutcome::Compared {
        delta,
        published,
        failed,
    })
}
