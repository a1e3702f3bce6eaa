//! Context snippets around whole-word mentions of a name in entry text.

use regex::Regex;

const CONTEXT_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct MentionMatcher {
    pattern: Regex,
    markup: Regex,
}

impl MentionMatcher {
    /// Case-insensitive whole-word matcher for `name`; regex metacharacters are escaped.
    pub fn new(name: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name.trim())))?,
            markup: Regex::new(r"<[^>]*>")?,
        })
    }

    /// Snippets from an entry title and its HTML summary: up to 200 characters
    /// either side of each mention, with `...` where text was cut. Duplicates
    /// are dropped across both, first occurrence wins.
    pub fn entry_snippets(&self, title: &str, summary: Option<&str>) -> Vec<String> {
        let mut snippets = Vec::new();
        self.collect_into(title, &mut snippets);
        if let Some(summary) = summary {
            let text = self.markup.replace_all(summary, " ").replace("&nbsp;", " ");
            self.collect_into(&text, &mut snippets);
        }
        snippets
    }

    fn collect_into(&self, text: &str, snippets: &mut Vec<String>) {
        for m in self.pattern.find_iter(text) {
            let start = text[..m.start()]
                .char_indices()
                .rev()
                .nth(CONTEXT_CHARS - 1)
                .map_or(0, |(i, _)| i);
            let end = text[m.end()..]
                .char_indices()
                .nth(CONTEXT_CHARS)
                .map_or(text.len(), |(i, _)| m.end() + i);

            let mut snippet = text[start..end].trim().to_string();
            if start > 0 {
                snippet.insert_str(0, "...");
            }
            if end < text.len() {
                snippet.push_str("...");
            }
            if !snippets.contains(&snippet) {
                snippets.push(snippet);
            }
        }
    }
}
