use crate::models::validation::{present, TAKEN};
use crate::models::{
    Listing, ListingDraft, NewPhoto, NewUnavailableRange, Photo, UnavailableRange,
    ValidationErrors,
};
use crate::search::{ListingFilterBuilder, SearchCriteria};
use crate::store::{ListingRepository, StoreError};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Listing operations on top of a repository
#[derive(Clone)]
pub struct ListingService {
    repo: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new listing
    pub async fn create_listing(&self, draft: ListingDraft) -> Result<Listing> {
        let listing = self.prepare(&draft, None).await?;
        let listing = self.repo.insert_listing(listing).await?;
        info!("Created listing {} \"{}\"", listing.id, listing.title);
        Ok(listing)
    }

    /// Validate and overwrite an existing listing's fields. Amenity flags the
    /// draft leaves unset keep their stored value.
    pub async fn update_listing(&self, id: i64, mut draft: ListingDraft) -> Result<Listing> {
        let stored = self.require_listing(id).await?;
        draft.amenities = draft.amenities.merged_over(&stored.amenities);
        let listing = self.prepare(&draft, Some(id)).await?;
        let listing = self.repo.update_listing(listing).await?;
        info!("Updated listing {}", listing.id);
        Ok(listing)
    }

    /// Validation, then the pre-save hooks
    async fn prepare(&self, draft: &ListingDraft, id: Option<i64>) -> Result<Listing> {
        let validated = draft.validate(id.unwrap_or_default());
        let mut errors = match &validated {
            Ok(_) => ValidationErrors::default(),
            Err(e) => e.clone(),
        };
        if let Some(title) = present(&draft.title) {
            if self.repo.title_taken(title, id).await? {
                errors.add("title", TAKEN);
            }
        }

        if !errors.is_empty() {
            warn!("Rejected listing save: {}", errors);
            return Err(errors.into());
        }

        let mut listing = validated?;
        listing.amenities.apply_defaults();
        listing.city = listing.city.to_lowercase();
        Ok(listing)
    }

    pub async fn find_listing(&self, id: i64) -> Result<Option<Listing>> {
        self.repo.find_listing(id).await
    }

    async fn require_listing(&self, id: i64) -> Result<Listing> {
        self.repo
            .find_listing(id)
            .await?
            .ok_or_else(|| StoreError::ListingNotFound(id).into())
    }

    /// Listings matching every set criterion, in storage order
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Listing>> {
        debug!("Searching listings with {:?}", criteria);
        ListingFilterBuilder::new(criteria)
            .build(self.repo.as_ref())
            .await
    }

    pub async fn unavailable_ranges(&self, listing_id: i64) -> Result<Vec<UnavailableRange>> {
        self.repo.unavailable_ranges(listing_id).await
    }

    pub async fn photos(&self, listing_id: i64) -> Result<Vec<Photo>> {
        self.repo.photos(listing_id).await
    }

    /// Earliest-created photo flagged as cover
    pub async fn cover_pic(&self, listing_id: i64) -> Result<Option<Photo>> {
        let photos = self.repo.photos(listing_id).await?;
        Ok(photos
            .into_iter()
            .filter(|p| p.cover)
            .min_by_key(|p| (p.created_at, p.id)))
    }

    /// Add a cover photo. Existing covers stay.
    pub async fn new_cover_pic(&self, listing_id: i64, data: Vec<u8>) -> Result<Photo> {
        self.add_photo(listing_id, data, true).await
    }

    /// Add one non-cover photo per attachment
    pub async fn new_photos(&self, listing_id: i64, datas: Vec<Vec<u8>>) -> Result<Vec<Photo>> {
        let mut photos = Vec::with_capacity(datas.len());
        for data in datas {
            photos.push(self.add_photo(listing_id, data, false).await?);
        }
        Ok(photos)
    }

    async fn add_photo(&self, listing_id: i64, attachment: Vec<u8>, cover: bool) -> Result<Photo> {
        let photo = self
            .repo
            .insert_photo(NewPhoto {
                listing_id,
                attachment,
                cover,
                created_at: Utc::now(),
            })
            .await?;
        debug!("Added photo {} to listing {} (cover: {})", photo.id, listing_id, cover);
        Ok(photo)
    }

    /// Mark `[start, end]` unavailable
    pub async fn new_unavail_range(
        &self,
        listing_id: i64,
        [start_date, end_date]: [NaiveDate; 2],
    ) -> Result<UnavailableRange> {
        let range = self
            .repo
            .insert_unavailable_range(NewUnavailableRange {
                listing_id,
                start_date,
                end_date,
            })
            .await?;
        debug!(
            "Listing {} unavailable {} to {}",
            listing_id, range.start_date, range.end_date
        );
        Ok(range)
    }
}
