pub mod config;
pub mod listings;
pub mod models;
pub mod search;
pub mod seed;
pub mod store;

pub use listings::ListingService;
pub use models::{Listing, ListingDraft, Photo, UnavailableRange};
pub use search::{ListingFilterBuilder, SearchCriteria};
pub use store::{InMemoryListingStore, ListingRepository};
