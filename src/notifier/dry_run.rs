use super::{NotifyError, Published, Publisher};

/// Logs announcements instead of posting them.
pub struct DryRunPublisher;

impl Publisher for DryRunPublisher {
    async fn post(&self, text: &str) -> Result<Published, NotifyError> {
        log::warn!("dry run, not publishing:\n{}", text);
        Ok(Published { id: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_publish_nothing() -> Result<(), NotifyError> {
        let published = DryRunPublisher.post("hello").await?;

        assert_eq!(published, Published { id: None });
        Ok(())
    }
}
