mod cli;
mod mention;
mod news;
mod runner;

pub const USER_AGENT: &str = concat!("newsprobe/", env!("CARGO_PKG_VERSION"));

use clap::Parser;
use cli::Args;
use mention::MentionMatcher;
use news::GoogleNewsClient;
use reqwest::Client;
use runner::QueryRunner;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("newsprobe=info".parse()?),
        )
        .init();

    let query = args.search_query();
    let client = GoogleNewsClient::new(Client::builder().build()?, args.locale());
    let mention = args.mention.as_deref().map(MentionMatcher::new).transpose()?;

    info!(terms = %query.terms(), window = %query.window(), "searching news");

    let mut stdout = std::io::stdout().lock();
    QueryRunner::new(&client)
        .with_entries(args.entries)
        .with_mention(mention)
        .run(&query, &mut stdout)
        .await
        .inspect_err(|e| tracing::error!("search failed: {e}"))?;

    Ok(())
}
