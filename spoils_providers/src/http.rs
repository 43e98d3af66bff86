//! Item lookup against the game's item description pages.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::COOKIE;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use spoils_core::{Item, ItemResolver, ResolveError};
use spoils_extract::{PatternName, get_or_compile, parse_int};

use crate::retry::retry_with_backoff;

/// Reads an item's id and name from its description page.
pub fn parse_description(html: &str, description_key: u64) -> Result<Item, ResolveError> {
    let id = get_or_compile(PatternName::ItemIdMarker)
        .captures(html)
        .and_then(|caps| parse_int(&caps[1]))
        .ok_or_else(|| ResolveError::lookup_failed(description_key, "missing item id marker"))?;
    let id = u32::try_from(id).map_err(|_| {
        ResolveError::lookup_failed(description_key, format!("item id {id} out of range"))
    })?;

    let name = get_or_compile(PatternName::ItemNameHeading)
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ResolveError::lookup_failed(description_key, "missing item name"))?;

    Ok(Item::new(id, description_key, name))
}

/// Resolves description keys by fetching `desc_item.php` from the server.
///
/// Every call fetches; wrap it in a
/// [`CachingResolver`](spoils_extract::CachingResolver) to look each key up
/// once per session.
pub struct HttpItemResolver {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
    retry_delays: Vec<u64>,
    final_retries: usize,
}

impl HttpItemResolver {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> reqwest::Result<Self> {
        let base_url = base_url.into();
        info!("Creating HttpItemResolver for {}", base_url);
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
            retry_delays: vec![1, 2, 4],
            final_retries: 2,
        })
    }

    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry_delays: Vec<u64>, final_retries: usize) -> Self {
        self.retry_delays = retry_delays;
        self.final_retries = final_retries;
        self
    }

    fn description_url(&self, description_key: u64) -> String {
        format!("{}/desc_item.php?whichitem={description_key}", self.base_url)
    }

    /// Helper method to fetch a single description page
    async fn try_fetch(&self, description_key: u64) -> anyhow::Result<String> {
        let mut request = self.client.get(self.description_url(description_key));
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl ItemResolver for HttpItemResolver {
    async fn resolve(&self, description_key: u64) -> Result<Arc<Item>, ResolveError> {
        debug!("Fetching item description: {}", description_key);

        let html = retry_with_backoff(
            || self.try_fetch(description_key),
            &self.retry_delays,
            self.final_retries,
        )
        .await
        .map_err(|e| ResolveError::lookup_failed(description_key, e.to_string()))?;

        let item = parse_description(&html, description_key)?;
        info!("Discovered item {} for description key {}", item, description_key);
        Ok(Arc::new(item))
    }
}
