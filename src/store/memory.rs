use crate::models::{
    Listing, NewPhoto, NewUnavailableRange, Photo, UnavailableRange, ValidationErrors,
};
use crate::store::traits::{ListingRepository, StoreError};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Tables {
    listings: Vec<Listing>,
    unavailable_ranges: Vec<UnavailableRange>,
    photos: Vec<Photo>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn ensure_listing(&self, id: i64) -> Result<()> {
        if self.listings.iter().any(|l| l.id == id) {
            Ok(())
        } else {
            Err(StoreError::ListingNotFound(id).into())
        }
    }

    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.listings
            .iter()
            .any(|l| l.title == title && Some(l.id) != except)
    }
}

/// In-process listing store. Rows keep insertion order.
#[derive(Default)]
pub struct InMemoryListingStore {
    tables: RwLock<Tables>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingStore {
    async fn listings(&self) -> Result<Vec<Listing>> {
        Ok(self.tables.read().await.listings.clone())
    }

    async fn find_listing(&self, id: i64) -> Result<Option<Listing>> {
        let tables = self.tables.read().await;
        Ok(tables.listings.iter().find(|l| l.id == id).cloned())
    }

    async fn title_taken(&self, title: &str, except: Option<i64>) -> Result<bool> {
        Ok(self.tables.read().await.title_taken(title, except))
    }

    async fn insert_listing(&self, mut listing: Listing) -> Result<Listing> {
        let mut tables = self.tables.write().await;
        if tables.title_taken(&listing.title, None) {
            return Err(ValidationErrors::title_taken().into());
        }

        listing.id = tables.next_id();
        debug!("Inserted listing {} ({})", listing.id, listing.title);
        tables.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(&self, listing: Listing) -> Result<Listing> {
        let mut tables = self.tables.write().await;
        if tables.title_taken(&listing.title, Some(listing.id)) {
            return Err(ValidationErrors::title_taken().into());
        }

        let slot = tables
            .listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or(StoreError::ListingNotFound(listing.id))?;
        *slot = listing.clone();
        Ok(listing)
    }

    async fn unavailable_ranges(&self, listing_id: i64) -> Result<Vec<UnavailableRange>> {
        let tables = self.tables.read().await;
        Ok(tables
            .unavailable_ranges
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn insert_unavailable_range(
        &self,
        range: NewUnavailableRange,
    ) -> Result<UnavailableRange> {
        let mut tables = self.tables.write().await;
        tables.ensure_listing(range.listing_id)?;

        let range = UnavailableRange {
            id: tables.next_id(),
            listing_id: range.listing_id,
            start_date: range.start_date,
            end_date: range.end_date,
        };
        tables.unavailable_ranges.push(range.clone());
        Ok(range)
    }

    async fn photos(&self, listing_id: i64) -> Result<Vec<Photo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .photos
            .iter()
            .filter(|p| p.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn insert_photo(&self, photo: NewPhoto) -> Result<Photo> {
        let mut tables = self.tables.write().await;
        tables.ensure_listing(photo.listing_id)?;

        let photo = Photo {
            id: tables.next_id(),
            listing_id: photo.listing_id,
            attachment: photo.attachment,
            cover: photo.cover,
            created_at: photo.created_at,
        };
        tables.photos.push(photo.clone());
        Ok(photo)
    }
}
