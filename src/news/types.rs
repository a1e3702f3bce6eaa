use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RssDocument {
    pub channel: Option<Channel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub title: Option<String>,
    pub link: Option<String>,
    pub language: Option<String>,
    pub last_build_date: Option<String>,
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
    pub source: Option<ItemSource>,
}

/// `<source url="https://publisher.example">Publisher</source>`
#[derive(Debug, Deserialize)]
pub struct ItemSource {
    #[serde(rename = "@url")]
    pub url: Option<String>,
    #[serde(rename = "$text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub feed: Option<Feed>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub title: Option<String>,
    pub link: Option<String>,
    pub language: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
    pub summary: Option<String>,
    pub source: Option<Source>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub name: String,
    pub url: Option<String>,
}
