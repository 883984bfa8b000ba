use anyhow::Result;
use rental_listings::config::Config;
use rental_listings::{seed, InMemoryListingStore, ListingService, SearchCriteria};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("🏠 Rental Listings - search");
    info!("Loading listings from {}", config.seed_path.display());

    let service = ListingService::new(Arc::new(InMemoryListingStore::new()));
    let seeds = seed::read_seed_file(&config.seed_path).await?;
    let base_dir = config.seed_path.parent().unwrap_or_else(|| Path::new("."));
    seed::load(&service, seeds, base_dir).await?;

    let criteria = SearchCriteria::from_params(&config.search_params);
    let listings = service.search(&criteria).await?;

    info!("✅ Found {} matching listings", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} ({} per {})", i + 1, listing.title, listing.price, listing.term);
        println!("   {} {}, sleeps {}", listing.home_type, listing.room_type, listing.accomodates);
        println!("   {}, {}", listing.address, listing.city);
        let amenities = listing.amenities();
        if !amenities.is_empty() {
            println!("   Amenities: {}", amenities.join(", "));
        }
        if let Some(cover) = service.cover_pic(listing.id).await? {
            println!("   Cover photo: #{} ({} bytes)", cover.id, cover.attachment.len());
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write(&config.output_path, json).await?;
    info!("💾 Saved results to {}", config.output_path.display());

    Ok(())
}
