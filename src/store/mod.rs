pub mod memory;
pub mod traits;

pub use memory::InMemoryListingStore;
pub use traits::{ListingRepository, StoreError};
