//! Cutout retrieval from the survey viewer with a local cache.
//!
//! Every failure is reported as `ImageUnavailable` so the operator can flag the
//! galaxy as broken instead of losing the batch.

use anyhow::Context;
use image::GrayImage;
use jellyfish::api::CutoutRequest;
use jellyfish::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Something that can put a cutout on disk for the operator to look at.
pub trait CutoutSource {
    fn fetch(&self, request: &CutoutRequest) -> Result<PathBuf>;
}

#[derive(Debug)]
pub struct CutoutFetcher {
    base_url: String,
    cache_dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl CutoutFetcher {
    pub fn new(base_url: impl Into<String>, cache_dir: PathBuf) -> anyhow::Result<Self> {
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("creating cutout dir {}", cache_dir.display()))?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("jellyfish-cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            cache_dir,
            client,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::ImageUnavailable(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::ImageUnavailable(format!(
                "{url} returned status {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| Error::ImageUnavailable(format!("reading body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl CutoutSource for CutoutFetcher {
    fn fetch(&self, request: &CutoutRequest) -> Result<PathBuf> {
        let path = self.cache_dir.join(request.file_name());
        if path.exists() {
            tracing::debug!(path = %path.display(), "using cached cutout");
            return Ok(path);
        }
        let url = request.url(&self.base_url);
        tracing::debug!(url, "downloading cutout");
        let bytes = self.download(&url)?;
        check_cutout(&bytes)?;
        fs::write(&path, &bytes).map_err(|e| {
            Error::ImageUnavailable(format!("saving cutout to {}: {e}", path.display()))
        })?;
        Ok(path)
    }
}

/// Decode the payload and reject blank images (outside the survey footprint).
pub fn check_cutout(bytes: &[u8]) -> Result<()> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::ImageUnavailable(format!("undecodable cutout: {e}")))?
        .into_luma8();
    if is_blank(&img) {
        return Err(Error::ImageUnavailable(
            "blank cutout (outside the survey footprint?)".to_string(),
        ));
    }
    Ok(())
}

fn is_blank(img: &GrayImage) -> bool {
    let mut pixels = img.pixels();
    match pixels.next() {
        None => true,
        Some(first) => pixels.all(|p| p == first),
    }
}
