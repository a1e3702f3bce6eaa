use std::fmt::Write as _;
use std::io::Write;

use tracing::{debug, warn};

use crate::mention::MentionMatcher;
use crate::news::{NewsError, NewsSearch, SearchResult};

/// Boolean query terms plus the relative window they are restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: String,
    window: String,
}

impl SearchQuery {
    pub fn new(terms: &str, window: &str) -> Self {
        Self {
            terms: terms.to_string(),
            window: window.to_string(),
        }
    }

    pub fn terms(&self) -> &str {
        &self.terms
    }

    pub fn window(&self) -> &str {
        &self.window
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Search(#[from] NewsError),

    #[error("response has no `{0}`")]
    MissingField(&'static str),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub struct QueryRunner<'a, C> {
    client: &'a C,
    entries: usize,
    mention: Option<MentionMatcher>,
}

impl<'a, C: NewsSearch> QueryRunner<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            entries: 0,
            mention: None,
        }
    }

    pub fn with_entries(mut self, entries: usize) -> Self {
        self.entries = entries;
        self
    }

    /// Prints context snippets for mentions of a name under each listed entry.
    pub fn with_mention(mut self, mention: Option<MentionMatcher>) -> Self {
        self.mention = mention;
        self
    }

    /// Issues the search and returns the feed title together with the full result.
    pub async fn feed_title(
        &self,
        query: &SearchQuery,
    ) -> Result<(String, SearchResult), RunError> {
        let result = self.client.search(query.terms(), query.window()).await?;

        let feed = result.feed.as_ref().ok_or(RunError::MissingField("feed"))?;
        let title = feed
            .title
            .clone()
            .ok_or(RunError::MissingField("feed.title"))?;

        debug!(
            link = ?feed.link,
            language = ?feed.language,
            updated = ?feed.updated,
            entries = result.entries.len(),
            "feed title resolved"
        );
        Ok((title, result))
    }

    /// Writes the feed title line, then up to `entries` entry lines, each
    /// followed by its mention snippets. Nothing is written unless the search
    /// and the title lookup both succeed.
    pub async fn run(&self, query: &SearchQuery, out: &mut impl Write) -> Result<(), RunError> {
        let (title, result) = self.feed_title(query).await.inspect_err(|e| {
            if let RunError::MissingField(field) = e {
                warn!(field = *field, "unexpected response shape");
            }
        })?;

        let mut output = format!("{title}\n");
        for entry in result.entries.iter().take(self.entries) {
            debug!(
                link = %entry.link,
                published = ?entry.published,
                source_url = ?entry.source.as_ref().and_then(|s| s.url.as_deref()),
                has_summary = entry.summary.is_some(),
                "entry"
            );
            let _ = match &entry.source {
                Some(source) => writeln!(output, "- {} ({})", entry.title, source.name),
                None => writeln!(output, "- {}", entry.title),
            };
            if let Some(mention) = &self.mention {
                for snippet in mention.entry_snippets(&entry.title, entry.summary.as_deref()) {
                    let _ = writeln!(output, "    > {snippet}");
                }
            }
        }

        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
