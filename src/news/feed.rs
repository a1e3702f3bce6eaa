use tracing::warn;

use super::client::NewsError;
use super::types::{Entry, Feed, Item, RssDocument, SearchResult, Source};

/// Decodes an RSS document. The body is expected to be UTF-8, which is what
/// Google News serves; other encodings are rejected as `NewsError::Parse`.
pub fn parse_feed(xml: &[u8]) -> Result<SearchResult, NewsError> {
    let document: RssDocument = quick_xml::de::from_reader(xml)?;
    Ok(extract_search_result(document))
}

pub fn extract_search_result(document: RssDocument) -> SearchResult {
    let Some(channel) = document.channel else {
        warn!("feed document has no <channel>");
        return SearchResult::default();
    };

    let entries: Vec<Entry> = channel.items.into_iter().filter_map(to_entry).collect();

    let feed = Feed {
        title: non_blank(channel.title),
        link: non_blank(channel.link),
        language: non_blank(channel.language),
        updated: non_blank(channel.last_build_date),
    };

    SearchResult {
        feed: Some(feed),
        entries,
    }
}

fn to_entry(item: Item) -> Option<Entry> {
    let title = non_blank(item.title)?;
    let link = non_blank(item.link)?;
    let source = item.source.and_then(|s| {
        Some(Source {
            name: non_blank(s.name)?,
            url: non_blank(s.url),
        })
    });

    Some(Entry {
        title,
        link,
        published: non_blank(item.pub_date),
        summary: non_blank(item.description),
        source,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE_NEWS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"Waymo AND Toyota when:6m" - Google News</title>
    <link>https://news.google.com/search?q=Waymo+AND+Toyota+when:6m&amp;hl=en-US&amp;gl=US&amp;ceid=US:en</link>
    <language>en-US</language>
    <webMaster>news-webmaster@google.com</webMaster>
    <copyright>2026 Google LLC</copyright>
    <lastBuildDate>Sat, 17 Oct 2026 09:12:00 GMT</lastBuildDate>
    <description>Google News</description>
    <item>
      <title>Waymo and Toyota agree to explore autonomous driving partnership - Reuters</title>
      <link>https://news.google.com/rss/articles/CBMiAAA?oc=5</link>
      <guid isPermaLink="false">CBMiAAA</guid>
      <pubDate>Tue, 29 Apr 2026 15:03:00 GMT</pubDate>
      <description>&lt;a href="https://news.google.com/rss/articles/CBMiAAA?oc=5"&gt;Waymo and Toyota&lt;/a&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Toyota eyes robotaxi tie-up</title>
      <link>https://news.google.com/rss/articles/CBMiBBB?oc=5</link>
      <guid isPermaLink="false">CBMiBBB</guid>
      <pubDate>Wed, 30 Apr 2026 08:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_channel_title_and_metadata() {
        let result = parse_feed(GOOGLE_NEWS_SAMPLE.as_bytes()).unwrap();

        let feed = result.feed.expect("feed present");
        assert_eq!(
            feed.title.as_deref(),
            Some("\"Waymo AND Toyota when:6m\" - Google News")
        );
        assert_eq!(feed.language.as_deref(), Some("en-US"));
        assert_eq!(
            feed.updated.as_deref(),
            Some("Sat, 17 Oct 2026 09:12:00 GMT")
        );
        assert!(feed.link.unwrap().contains("ceid=US:en"));
    }

    #[test]
    fn parses_entries_with_sources() {
        let result = parse_feed(GOOGLE_NEWS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(result.entries.len(), 2);

        let first = &result.entries[0];
        assert!(first.title.starts_with("Waymo and Toyota agree"));
        assert_eq!(
            first.published.as_deref(),
            Some("Tue, 29 Apr 2026 15:03:00 GMT")
        );
        assert!(first.summary.as_deref().unwrap().starts_with("<a href="));
        let source = first.source.as_ref().unwrap();
        assert_eq!(source.name, "Reuters");
        assert_eq!(source.url.as_deref(), Some("https://www.reuters.com"));

        assert!(result.entries[1].source.is_none());
        assert!(result.entries[1].summary.is_none());
    }

    #[test]
    fn channel_without_items_has_no_entries() {
        let xml = "<rss><channel><title>Empty - Google News</title></channel></rss>";
        let result = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(
            result.feed.unwrap().title.as_deref(),
            Some("Empty - Google News")
        );
        assert!(result.entries.is_empty());
    }

    #[test]
    fn missing_channel_yields_no_feed() {
        let result = parse_feed(b"<rss version=\"2.0\"></rss>").unwrap();
        assert!(result.feed.is_none());
        assert!(result.entries.is_empty());
    }

    #[test]
    fn blank_title_is_treated_as_absent() {
        let xml = "<rss><channel><title>   </title></channel></rss>";
        let result = parse_feed(xml.as_bytes()).unwrap();
        assert!(result.feed.unwrap().title.is_none());
    }

    #[test]
    fn skips_items_without_title_or_link() {
        let xml = r#"<rss><channel><title>T</title>
            <item><title>No link</title></item>
            <item><link>https://no-title.example</link></item>
            <item><title>Kept</title><link>https://kept.example</link></item>
        </channel></rss>"#;
        let result = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].title, "Kept");
    }

    #[test]
    fn items_interleaved_with_channel_elements() {
        let xml = r#"<rss><channel>
            <title>A &amp; B</title>
            <item><title>x</title><link>https://x.example</link></item>
            <description>d</description>
            <item><title>y</title><link>https://y.example</link></item>
        </channel></rss>"#;
        let result = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(result.feed.unwrap().title.as_deref(), Some("A & B"));
        let titles: Vec<_> = result.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "y"]);
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        let err = parse_feed(b"<html><body>Sorry").unwrap_err();
        assert!(matches!(err, NewsError::Parse(_)), "got: {err:?}");
    }
}
