//! Yearly catalog downloads with existence-check caching.
//!
//! The National Observatory of Athens publishes one text file per year,
//! named `CAT{year}.TXT`. Files never change once published, so a file
//! already present in the cache directory is served as-is without touching
//! the network.

use crate::{FetchError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Base URL of the NOA earthquake catalog.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://www.gein.noa.gr/HTML/Noa_cat";

/// HTTP timeout for catalog downloads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloader for yearly catalog files with a local cache directory.
#[derive(Debug)]
pub struct CatalogClient {
    cache_dir: PathBuf,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl CatalogClient {
    /// Create a client caching under `cache_dir`, against the NOA server.
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        Self::with_base_url(cache_dir, DEFAULT_CATALOG_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url<P: AsRef<Path>>(cache_dir: P, base_url: &str) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            cache_dir,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Remote URL of a year's catalog file.
    pub fn catalog_url(&self, year: i32) -> String {
        format!("{}/CAT{}.TXT", self.base_url, year)
    }

    /// Local cache path of a year's catalog file.
    pub fn cache_path(&self, year: i32) -> PathBuf {
        self.cache_dir.join(format!("CAT{year}.TXT"))
    }

    /// Fetch one year's catalog, using the cache if the file exists.
    ///
    /// On a failed download no file is left behind, so the next run
    /// retries.
    pub fn fetch_year(&self, year: i32) -> Result<PathBuf> {
        let path = self.cache_path(year);
        if path.exists() {
            info!(year, path = %path.display(), "earthquake data already downloaded");
            return Ok(path);
        }

        let url = self.catalog_url(year);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url,
                status: response.status(),
            });
        }
        let body = response.bytes()?;

        // Download fully before creating the file.
        let mut file = fs::File::create(&path)?;
        file.write_all(&body)?;
        info!(year, bytes = body.len(), "downloaded catalog");
        Ok(path)
    }

    /// Fetch several years sequentially.
    ///
    /// A failed year is logged and reported in the result list but does not
    /// abort the remaining fetches.
    pub fn fetch_years(&self, years: &[i32]) -> Vec<(i32, Result<PathBuf>)> {
        years
            .iter()
            .map(|&year| {
                let result = self.fetch_year(year);
                if let Err(e) = &result {
                    warn!(year, error = %e, "catalog download failed");
                }
                (year, result)
            })
            .collect()
    }
}
