use crate::listings::ListingService;
use crate::models::ListingDraft;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One listing in a seed file, with its child records
#[derive(Debug, Clone, Deserialize)]
pub struct SeedListing {
    #[serde(flatten)]
    pub draft: ListingDraft,
    #[serde(default)]
    pub unavailable_ranges: Vec<[NaiveDate; 2]>,
    /// Image file, relative to the seed file
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

pub async fn read_seed_file(path: &Path) -> Result<Vec<SeedListing>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid seed file {}", path.display()))
}

/// Store every seed listing. Invalid entries are logged and skipped.
pub async fn load(
    service: &ListingService,
    seeds: Vec<SeedListing>,
    base_dir: &Path,
) -> Result<usize> {
    let mut loaded = 0;

    for seed in seeds {
        let title = seed.draft.title.clone().unwrap_or_default();
        let listing = match service.create_listing(seed.draft).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Skipping seed listing \"{}\": {}", title, e);
                continue;
            }
        };

        for range in seed.unavailable_ranges {
            service.new_unavail_range(listing.id, range).await?;
        }

        if let Some(file) = seed.cover_photo {
            let data = read_photo(base_dir, &file).await?;
            service.new_cover_pic(listing.id, data).await?;
        }

        let mut photos = Vec::with_capacity(seed.photos.len());
        for file in &seed.photos {
            photos.push(read_photo(base_dir, file).await?);
        }
        if !photos.is_empty() {
            service.new_photos(listing.id, photos).await?;
        }

        loaded += 1;
    }

    info!("Loaded {} seed listings", loaded);
    Ok(loaded)
}

async fn read_photo(base_dir: &Path, file: &str) -> Result<Vec<u8>> {
    let path = base_dir.join(file);
    tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read photo {}", path.display()))
}
