pub mod criteria;
pub mod filter;

pub use criteria::SearchCriteria;
pub use filter::{available_range, ListingFilterBuilder};
