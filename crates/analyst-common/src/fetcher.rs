//! Table sources: fetch a web page and extract its main data table
//!
//! The HTTP implementation uses a pooled reqwest client with a hard
//! timeout. Callers treat every failure as recoverable and substitute
//! placeholder answers, so errors here carry enough context to be logged
//! as the fallback reason.

use crate::error::{AnalystError, Result};
use crate::table::{parse_html_tables, select_main_table, Table};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Browser-like user agent; Wikipedia rejects anonymous default agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Source of tabular data addressed by URL.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TableFetcher: Send + Sync {
    /// Fetches the page at `url` and returns its main table.
    async fn fetch_table(&self, url: &str) -> Result<Table>;
}

/// Configuration for the HTTP table fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Connect + read timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User agent header sent with each request
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches HTML pages over HTTP and extracts the main table.
#[derive(Debug, Clone)]
pub struct HttpTableFetcher {
    client: Client,
}

impl HttpTableFetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| AnalystError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalystError::fetch_with_source("Table request failed", url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Table source returned {}", status);
            return Err(AnalystError::fetch(
                format!("Table source returned HTTP {}", status.as_u16()),
                url,
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AnalystError::fetch_with_source("Failed to read response body", url, e))
    }
}

/// Extracts the main table from an HTML document.
pub fn main_table_from_html(html: &str, url: &str) -> Result<Table> {
    let tables = parse_html_tables(html)?;
    debug!("Found {} candidate tables", tables.len());

    select_main_table(tables).ok_or_else(|| AnalystError::fetch("No tables found on page", url))
}

#[async_trait]
impl TableFetcher for HttpTableFetcher {
    #[instrument(skip(self))]
    async fn fetch_table(&self, url: &str) -> Result<Table> {
        let html = self.fetch_html(url).await?;
        let table = main_table_from_html(&html, url)?;

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Extracted table"
        );
        Ok(table)
    }
}
