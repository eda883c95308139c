//! Fetching manaba pages.
//!
//! Walks the home page, each course page and its three category listings,
//! and hands the raw text to the extractor. A listing that fails to load
//! is recorded as unavailable instead of aborting the walk.

use std::time::Duration;

use anyhow::{Context, Result};
use manaba_core::page;
use manaba_core::{Category, CategoryListing, CoursePage, ListingRows};
use tracing::{debug, warn};

use crate::observer::{SyncObserver, scaled};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Somewhere HTML can be fetched from.
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP session against manaba using Basic credentials and a cookie jar.
pub struct ManabaClient {
    client: reqwest::Client,
    username: String,
    password: String,
}

impl ManabaClient {
    pub fn new(username: String, password: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(ManabaClient {
            client,
            username,
            password,
        })
    }
}

impl PageSource for ManabaClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT_LANGUAGE, "ja-JP,ja;q=0.9")
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}

/// Fetch every course reachable from `home_url`.
///
/// Fails when the home page cannot be loaded, shows no course list (not
/// logged in), or none of the listed courses yields a single listing.
/// Progress runs from 10% to 60%.
pub async fn collect_course_pages<S: PageSource>(
    source: &S,
    home_url: &str,
    observer: &dyn SyncObserver,
) -> Result<Vec<CoursePage>> {
    let home = source
        .fetch(home_url)
        .await
        .context("Failed to load the manaba home page")?;

    if !page::has_course_list(&home) {
        anyhow::bail!("manaba login failed: no course list on {}. Check your ID and password.", home_url);
    }

    let links = page::course_links(&home, home_url)?;
    debug!("Found {} course links", links.len());

    let mut pages = Vec::with_capacity(links.len());

    for (i, course_url) in links.iter().enumerate() {
        observer.progress(scaled(i, links.len(), 10, 60));

        let course_html = match source.fetch(course_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping course {}: {:#}", course_url, e);
                pages.push(CoursePage::unavailable(course_url.as_str(), format!("{:#}", e)));
                continue;
            }
        };

        let Some(course_name) = page::course_name(&course_html) else {
            pages.push(CoursePage {
                location: course_url.clone(),
                course_name: None,
                listings: Vec::new(),
                unavailable: None,
            });
            continue;
        };

        observer.log(&format!(" > {}", course_name));

        let mut listings = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let url = page::listing_url(course_url, category);
            let rows = match source.fetch(&url).await {
                Ok(html) => ListingRows::Loaded(page::row_texts(&html)),
                Err(e) => ListingRows::Unavailable(format!("{:#}", e)),
            };
            listings.push(CategoryListing { category, rows });
        }

        pages.push(CoursePage {
            location: course_url.clone(),
            course_name: Some(course_name),
            listings,
            unavailable: None,
        });
    }

    if !links.is_empty() && !pages.iter().any(CoursePage::has_loaded_listing) {
        anyhow::bail!(
            "Could not load any of {} courses from manaba; nothing was extracted",
            links.len()
        );
    }

    observer.progress(60);
    Ok(pages)
}
