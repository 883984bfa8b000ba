use crate::models::{Listing, NewPhoto, NewUnavailableRange, Photo, UnavailableRange};
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Listing {0} not found")]
    ListingNotFound(i64),
}

/// Storage seam for listings and their child records.
/// Implementations own query execution; filtering logic lives in `search`.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Every listing, in storage order
    async fn listings(&self) -> Result<Vec<Listing>>;

    async fn find_listing(&self, id: i64) -> Result<Option<Listing>>;

    /// Whether another listing (other than `except`) already uses `title`
    async fn title_taken(&self, title: &str, except: Option<i64>) -> Result<bool>;

    /// Store a new listing. The id on the input is ignored and a fresh one assigned.
    async fn insert_listing(&self, listing: Listing) -> Result<Listing>;

    /// Replace the stored listing with the same id
    async fn update_listing(&self, listing: Listing) -> Result<Listing>;

    async fn unavailable_ranges(&self, listing_id: i64) -> Result<Vec<UnavailableRange>>;

    async fn insert_unavailable_range(&self, range: NewUnavailableRange)
        -> Result<UnavailableRange>;

    async fn photos(&self, listing_id: i64) -> Result<Vec<Photo>>;

    async fn insert_photo(&self, photo: NewPhoto) -> Result<Photo>;
}
