use clap::Parser;

use crate::news::Locale;
use crate::runner::SearchQuery;

pub const DEFAULT_TERMS: &str = "Waymo AND Toyota";
pub const DEFAULT_WINDOW: &str = "6m";

/// Search Google News within a relative time window and print the feed title.
#[derive(Debug, Parser)]
#[command(name = "newsprobe", version, about)]
pub struct Args {
    /// Boolean search expression, e.g. "Waymo AND Toyota"
    #[arg(short, long, default_value = DEFAULT_TERMS)]
    pub query: String,

    /// Relative window understood by the service: "1h", "7d", "6m", ...
    #[arg(short, long, default_value = DEFAULT_WINDOW)]
    pub when: String,

    /// Interface language of the news edition
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Country of the news edition
    #[arg(long, default_value = "US")]
    pub country: String,

    /// Also print up to N entries below the title
    #[arg(short = 'n', long, default_value_t = 0)]
    pub entries: usize,

    /// Show context snippets where this name is mentioned in listed entries
    #[arg(short, long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub mention: Option<String>,
}

impl Args {
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.query, &self.when)
    }

    pub fn locale(&self) -> Locale {
        Locale::new(&self.lang, &self.country)
    }
}
