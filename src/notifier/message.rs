use super::template::{handlebars, MESSAGE_TEMPLATE};
use crate::snapshot::PullRequestRecord;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const ELLIPSIS: char = '…';

#[derive(Serialize)]
struct MessageContext<'a> {
    owner: &'a str,
    repo: &'a str,
    number: u64,
    title: &'a str,
    author: &'a str,
    url: &'a str,
    created_at: &'a str,
}

/// Renders announcements that fit within `max_length` characters.
pub struct MessageRenderer {
    hb: Handlebars<'static>,
    owner: String,
    repo: String,
    max_length: usize,
}

impl MessageRenderer {
    pub fn new(
        template: Option<&str>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, TemplateError> {
        Ok(MessageRenderer {
            hb: handlebars(template)?,
            owner: owner.into(),
            repo: repo.into(),
            max_length,
        })
    }

    /// Long titles are shortened first; if the rest of the message alone is
    /// still over the limit, the whole text is cut.
    pub fn render(&self, record: &PullRequestRecord) -> Result<String, RenderError> {
        let message = self.render_with_title(record, &record.title)?;
        let length = message.chars().count();
        if length <= self.max_length {
            return Ok(message);
        }

        let overflow = length - self.max_length;
        let keep = record.title.chars().count().saturating_sub(overflow + 1);
        if keep > 0 {
            let title = shorten(&record.title, keep);
            let message = self.render_with_title(record, &title)?;
            if message.chars().count() <= self.max_length {
                return Ok(message);
            }
        }

        Ok(shorten(&message, self.max_length.saturating_sub(1)))
    }

    fn render_with_title(
        &self,
        record: &PullRequestRecord,
        title: &str,
    ) -> Result<String, RenderError> {
        let context = MessageContext {
            owner: &self.owner,
            repo: &self.repo,
            number: record.number,
            title,
            author: &record.author,
            url: &record.url,
            created_at: &record.created_at,
        };

        let rendered = self.hb.render(MESSAGE_TEMPLATE, &context)?;
        Ok(rendered.trim().to_owned())
    }
}

fn shorten(text: &str, keep: usize) -> String {
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.truncate(shortened.trim_end().len());
    shortened.push(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::record;

    fn renderer(template: Option<&str>, max_length: usize) -> MessageRenderer {
        MessageRenderer::new(template, "polkadot-fellows", "RFCs", max_length)
            .expect("template should compile")
    }

    #[test]
    fn should_render_the_default_announcement() {
        let message = renderer(None, 280)
            .render(&record(42, "Coretime & <scheduling>"))
            .expect("should render");

        assert_eq!(
            message,
            "A new pull request has been opened in polkadot-fellows/RFCs! #PR42\n\n\
             Title: Coretime & <scheduling>\n\
             Author: https://github.com/octocat\n\n\
             https://github.com/owner/repo/pull/42"
        );
    }

    #[test]
    fn should_render_a_custom_template() {
        let message = renderer(Some("#RFC{{number}} {{title}} ({{created_at}})"), 280)
            .render(&record(7, "Proposal"))
            .expect("should render");

        assert_eq!(message, "#RFC7 Proposal (2024-01-01T00:00:00Z)");
    }

    #[test]
    fn should_shorten_long_titles_to_fit() {
        let title = "a".repeat(400);
        let renderer = renderer(Some("{{number}}: {{title}} {{url}}"), 280);

        let message = renderer
            .render(&record(1, &title))
            .expect("should render");

        assert_eq!(message.chars().count(), 280);
        assert!(message.starts_with("1: aaa"));
        assert!(message.ends_with("… https://github.com/owner/repo/pull/1"));
    }

    #[test]
    fn should_count_characters_not_bytes() {
        let title = "ü".repeat(100);
        let renderer = renderer(Some("{{title}}"), 50);

        let message = renderer
            .render(&record(1, &title))
            .expect("should render");

        assert_eq!(message.chars().count(), 50);
        assert!(message.ends_with('…'));
    }

    #[test]
    fn should_cut_the_whole_message_when_the_title_is_not_enough() {
        let renderer = renderer(Some("{{url}} {{url}} {{title}}"), 20);

        let message = renderer
            .render(&record(1, "short"))
            .expect("should render");

        assert_eq!(message.chars().count(), 20);
        assert_eq!(message, "https://github.com/…");
    }

    #[test]
    fn should_fit_the_smallest_length() {
        let renderer = renderer(Some("{{title}}"), 2);

        let message = renderer
            .render(&record(1, "hello"))
            .expect("should render");

        assert_eq!(message, "h…");
    }

    #[test]
    fn should_leave_short_messages_untouched() {
        let renderer = renderer(Some("{{title}}"), 10);

        let message = renderer
            .render(&record(1, "exactly10!"))
            .expect("should render");

        assert_eq!(message, "exactly10!");
    }
}
