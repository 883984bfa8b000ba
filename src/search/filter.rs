use crate::models::{Amenity, Listing, UnavailableRange};
use crate::search::criteria::SearchCriteria;
use crate::store::ListingRepository;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

pub fn matches_city(listing: &Listing, city: &str) -> bool {
    listing.city.to_lowercase() == city.to_lowercase()
}

pub fn matches_accomodates(listing: &Listing, guests: i32) -> bool {
    listing.accomodates >= guests
}

/// Inclusive on both ends
pub fn matches_price(listing: &Listing, low: i64, high: i64) -> bool {
    listing.price >= low && listing.price <= high
}

pub fn matches_amenity(listing: &Listing, amenity: Amenity) -> bool {
    listing.amenities.has(amenity)
}

/// A listing is available for `start..=end` unless one of its unavailable
/// ranges falls even partly outside that window. Ranges entirely inside the
/// window do not exclude the listing.
pub fn available_range(ranges: &[UnavailableRange], start: NaiveDate, end: NaiveDate) -> bool {
    !ranges
        .iter()
        .any(|range| !(range.start_date >= start && range.end_date <= end))
}

type Predicate<'a> = Box<dyn Fn(&Listing) -> bool + Send + Sync + 'a>;

/// Composes the criteria into an AND of column predicates, then runs the
/// availability check over the survivors.
pub struct ListingFilterBuilder<'a> {
    criteria: &'a SearchCriteria,
}

impl<'a> ListingFilterBuilder<'a> {
    pub fn new(criteria: &'a SearchCriteria) -> Self {
        Self { criteria }
    }

    /// Column predicates in application order. Unset criteria contribute nothing.
    fn predicates(&self) -> Vec<Predicate<'a>> {
        let criteria = self.criteria;
        let mut predicates: Vec<Predicate<'a>> = Vec::new();

        if let Some(city) = &criteria.city {
            let city = city.to_lowercase();
            predicates.push(Box::new(move |l: &Listing| matches_city(l, &city)));
        }
        if let Some(guests) = criteria.accomodates {
            predicates.push(Box::new(move |l: &Listing| matches_accomodates(l, guests)));
        }
        if let Some(room_type) = criteria.room_type {
            predicates.push(Box::new(move |l: &Listing| l.room_type == room_type));
        }
        if let Some((low, high)) = criteria.price_range() {
            predicates.push(Box::new(move |l: &Listing| matches_price(l, low, high)));
        }
        if let Some(term) = &criteria.term {
            predicates.push(Box::new(move |l: &Listing| &l.term == term));
        }
        if let Some(home_type) = criteria.home_type {
            predicates.push(Box::new(move |l: &Listing| l.home_type == home_type));
        }
        for amenity in Amenity::ALL {
            if criteria.amenities.has(amenity) {
                predicates.push(Box::new(move |l: &Listing| matches_amenity(l, amenity)));
            }
        }

        predicates
    }

    /// Apply the column predicates to `listings`, keeping their order
    pub fn filter(&self, listings: Vec<Listing>) -> Vec<Listing> {
        let predicates = self.predicates();
        listings
            .into_iter()
            .filter(|listing| predicates.iter().all(|p| p(listing)))
            .collect()
    }

    /// Run the full search against `repo`
    pub async fn build(&self, repo: &dyn ListingRepository) -> Result<Vec<Listing>> {
        let candidates = repo.listings().await?;
        let total = candidates.len();
        let mut listings = self.filter(candidates);
        debug!("{} of {} listings pass column filters", listings.len(), total);

        // Needs each listing's child rows, so it can only run on the materialized set
        if let Some((start, end)) = self.criteria.stay() {
            let mut available = Vec::with_capacity(listings.len());
            for listing in listings {
                let ranges = repo.unavailable_ranges(listing.id).await?;
                if available_range(&ranges, start, end) {
                    available.push(listing);
                }
            }
            listings = available;
        }

        info!("Search matched {} of {} listings", listings.len(), total);
        Ok(listings)
    }
}
