//! Placeholder image fetcher
//!
//! Downloads the site's 44 placeholder images from picsum.photos into a
//! fixed assets/img/ layout. Best effort: individual failures are
//! reported and skipped, the rest of the batch continues.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const SERVICE: &str = "https://picsum.photos";
const USER_AGENT: &str = "petit-assets/0.1";

/// One output image: relative path under the output root plus pixel size
struct Placeholder {
    path: String,
    width: u32,
    height: u32,
}

impl Placeholder {
    fn new(path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    /// Stable per-file seed so re-runs fetch the same picture
    fn seed(&self) -> String {
        let stem = self
            .path
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
            .trim_end_matches(".jpg");
        format!("petits-pas-{stem}")
    }

    fn url(&self) -> Result<Url> {
        Url::parse(&format!(
            "{SERVICE}/seed/{}/{}/{}",
            self.seed(),
            self.width,
            self.height
        ))
        .with_context(|| format!("bad url for {}", self.path))
    }
}

/// The full 44-image manifest
fn manifest() -> Vec<Placeholder> {
    let mut images = vec![Placeholder::new("hero.jpg", 1600, 900)];
    for i in 1..=4 {
        images.push(Placeholder::new(format!("equipe/equipe-{i}.jpg"), 600, 600));
    }
    for name in ["eveil", "jardin", "repas", "sieste", "activites", "sorties"] {
        images.push(Placeholder::new(format!("services/{name}.jpg"), 800, 600));
    }
    for i in 1..=24 {
        images.push(Placeholder::new(format!("galerie/galerie-{i}.jpg"), 800, 600));
    }
    for i in 1..=6 {
        images.push(Placeholder::new(
            format!("temoignages/temoignage-{i}.jpg"),
            400,
            400,
        ));
    }
    for i in 1..=3 {
        images.push(Placeholder::new(format!("blog/blog-{i}.jpg"), 800, 450));
    }
    images
}

fn fetch_one(client: &Client, root: &Path, image: &Placeholder) -> Result<u64> {
    let url = image.url()?;
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("fetch failed for {}", image.path))?;
    let bytes = response
        .bytes()
        .with_context(|| format!("body read failed for {}", image.path))?;

    let target = root.join(&image.path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    fs::write(&target, &bytes).with_context(|| format!("cannot write {}", target.display()))?;
    Ok(bytes.len() as u64)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/img"));
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("http client")?;

    let mut ok = 0usize;
    let mut failed = 0usize;
    let mut total_bytes = 0u64;
    for image in manifest() {
        match fetch_one(&client, &root, &image) {
            Ok(bytes) => {
                ok += 1;
                total_bytes += bytes;
                info!(path = %image.path, bytes, "downloaded");
            }
            Err(err) => {
                failed += 1;
                warn!(path = %image.path, %err, "skipped");
            }
        }
    }

    info!(ok, failed, total_bytes, "batch finished");
    Ok(())
}
