use std::path::PathBuf;

use clap::Parser;

use super::config::SearchConfig;

#[derive(Debug, Parser)]
#[command(name = "hn_search")]
#[command(about = "Search Hacker News from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (RON). Defaults to ./hn_search.ron when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial search term.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Override the search API base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Results per page.
    #[arg(long)]
    pub hits_per_page: Option<u32>,

    /// Log at debug level and mirror the log to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies command line overrides on top of the file settings.
    pub fn apply(&self, config: &mut SearchConfig) {
        if let Some(query) = &self.query {
            config.default_query = query.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(hits_per_page) = self.hits_per_page {
            config.hits_per_page = hits_per_page;
        }
    }
}
