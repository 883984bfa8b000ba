use crate::models::{HomeType, Listing, ListingDraft, RoomType};
use std::fmt;
use thiserror::Error;

pub const BLANK: &str = "can't be blank";
pub const TAKEN: &str = "has already been taken";
pub const INVALID_HOME_TYPE: &str = "Not a valid home type.";
pub const INVALID_ROOM_TYPE: &str = "Not a valid room type.";

/// A single failed check on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Rejected save, with every failing field
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("Validation failed: {}", join(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded against `field`
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn title_taken() -> Self {
        let mut errors = Self::default();
        errors.add("title", TAKEN);
        errors
    }
}

/// The value as given, unless it is missing or whitespace only
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ListingDraft {
    /// Run the presence and inclusion checks and build the listing.
    /// Title uniqueness needs storage and is checked by the caller.
    pub fn validate(&self, id: i64) -> Result<Listing, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = present(&self.title);
        if title.is_none() {
            errors.add("title", BLANK);
        }

        let home_type = match present(&self.home_type) {
            None => {
                errors.add("home_type", BLANK);
                errors.add("home_type", INVALID_HOME_TYPE);
                None
            }
            Some(raw) => match raw.parse::<HomeType>() {
                Ok(home_type) => Some(home_type),
                Err(_) => {
                    errors.add("home_type", INVALID_HOME_TYPE);
                    None
                }
            },
        };

        let room_type = match present(&self.room_type) {
            None => {
                errors.add("room_type", BLANK);
                errors.add("room_type", INVALID_ROOM_TYPE);
                None
            }
            Some(raw) => match raw.parse::<RoomType>() {
                Ok(room_type) => Some(room_type),
                Err(_) => {
                    errors.add("room_type", INVALID_ROOM_TYPE);
                    None
                }
            },
        };

        if self.accomodates.is_none() {
            errors.add("accomodates", BLANK);
        }
        let term = present(&self.term);
        if term.is_none() {
            errors.add("term", BLANK);
        }
        let city = present(&self.city);
        if city.is_none() {
            errors.add("city", BLANK);
        }
        if self.price.is_none() {
            errors.add("price", BLANK);
        }
        let address = present(&self.address);
        if address.is_none() {
            errors.add("address", BLANK);
        }

        match (title, home_type, room_type, self.accomodates, term, city, self.price, address) {
            (
                Some(title),
                Some(home_type),
                Some(room_type),
                Some(accomodates),
                Some(term),
                Some(city),
                Some(price),
                Some(address),
            ) if errors.is_empty() => Ok(Listing {
                id,
                owner_id: self.owner_id,
                title: title.to_string(),
                home_type,
                room_type,
                accomodates,
                term: term.to_string(),
                city: city.to_string(),
                price,
                address: address.to_string(),
                amenities: self.amenities.clone(),
            }),
            _ => Err(errors),
        }
    }
}
