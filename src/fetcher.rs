use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::ApiSettings;
use crate::error::FetchError;
use crate::posting::{FlatRecord, RawPosting};

/// Anything that can hand back the postings of one listing page.
pub trait PageSource {
    fn fetch_page(&mut self, page: u32) -> Result<Vec<RawPosting>, FetchError>;
}

#[derive(Deserialize)]
struct ListingResponse {
    result: ListingResult,
}

#[derive(Deserialize)]
struct ListingResult {
    positions: Vec<RawPosting>,
}

/// Blocking client for `GET {base_url}?page={n}`.
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(api: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&api.referer).context("Invalid referer header value")?,
        );

        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: api.base_url.clone(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&mut self, page: u32) -> Result<Vec<RawPosting>, FetchError> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|source| FetchError::Transport { page, source })?;

        parse_listing(page, &body)
    }
}

/// Extract `result.positions` from a listing response body.
pub fn parse_listing(page: u32, body: &str) -> Result<Vec<RawPosting>, FetchError> {
    serde_json::from_str::<ListingResponse>(body)
        .map(|listing| listing.result.positions)
        .map_err(|source| FetchError::Parse { page, source })
}

/// Walk pages 1, 2, 3, ... until one comes back empty.
///
/// Any error aborts the whole walk and the records gathered so far are
/// dropped. Without `max_pages` the loop relies on the upstream eventually
/// returning an empty page.
pub fn fetch_all<S: PageSource>(
    source: &mut S,
    max_pages: Option<NonZeroU32>,
) -> Result<Vec<FlatRecord>, FetchError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut records = Vec::new();
    let mut page: u32 = 1;

    loop {
        if max_pages.is_some_and(|limit| page > limit.get()) {
            warn!(
                max_pages = page - 1,
                "Page cap reached before an empty page; stopping early"
            );
            break;
        }

        pb.set_message(format!("fetching page {}", page));
        let postings = source.fetch_page(page)?;
        if postings.is_empty() {
            info!(page, "Empty page, listing exhausted");
            break;
        }

        let count = postings.len();
        for raw in postings {
            let record =
                FlatRecord::try_from(raw).map_err(|source| FetchError::Normalize { page, source })?;
            records.push(record);
        }

        pb.suspend(|| println!("----- page {} done: {} postings -----", page, count));
        pb.tick();
        page += 1;
    }

    pb.finish_and_clear();
    info!("Fetched {} postings from {} pages", records.len(), page - 1);
    Ok(records)
}
