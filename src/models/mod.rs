pub mod validation;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use validation::{FieldError, ValidationErrors};

/// Value that names no variant of an enumerated field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Kind of dwelling being rented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HomeType {
    Apartment,
    House,
    Mansion,
    Cave,
}

impl HomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeType::Apartment => "apartment",
            HomeType::House => "house",
            HomeType::Mansion => "mansion",
            HomeType::Cave => "cave",
        }
    }
}

impl FromStr for HomeType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(HomeType::Apartment),
            "house" => Ok(HomeType::House),
            "mansion" => Ok(HomeType::Mansion),
            "cave" => Ok(HomeType::Cave),
            _ => Err(UnknownVariant::new("home type", s)),
        }
    }
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the home the guest gets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Whole,
    Private,
    Shared,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Whole => "whole",
            RoomType::Private => "private",
            RoomType::Shared => "shared",
        }
    }
}

impl FromStr for RoomType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole" => Ok(RoomType::Whole),
            "private" => Ok(RoomType::Private),
            "shared" => Ok(RoomType::Shared),
            _ => Err(UnknownVariant::new("room type", s)),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight boolean amenity flags a listing carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    Essentials,
    Tv,
    Cable,
    Ac,
    Heat,
    Kitchen,
    Internet,
    Wifi,
}

impl Amenity {
    /// Display order of amenity labels. Not alphabetical.
    pub const ALL: [Amenity; 8] = [
        Amenity::Essentials,
        Amenity::Tv,
        Amenity::Cable,
        Amenity::Ac,
        Amenity::Heat,
        Amenity::Kitchen,
        Amenity::Internet,
        Amenity::Wifi,
    ];

    /// Field / parameter name
    pub fn key(&self) -> &'static str {
        match self {
            Amenity::Essentials => "essentials",
            Amenity::Tv => "tv",
            Amenity::Cable => "cable",
            Amenity::Ac => "ac",
            Amenity::Heat => "heat",
            Amenity::Kitchen => "kitchen",
            Amenity::Internet => "internet",
            Amenity::Wifi => "wifi",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Essentials => "Essentials",
            Amenity::Tv => "Television",
            Amenity::Cable => "Cable TV",
            Amenity::Ac => "Air Conditioning",
            Amenity::Heat => "Heat",
            Amenity::Kitchen => "Kitchen",
            Amenity::Internet => "Wired Internet",
            Amenity::Wifi => "WiFi",
        }
    }
}

/// Amenity flags of a listing. `None` means "never set".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenities {
    #[serde(default)]
    pub essentials: Option<bool>,
    #[serde(default)]
    pub tv: Option<bool>,
    #[serde(default)]
    pub cable: Option<bool>,
    #[serde(default)]
    pub ac: Option<bool>,
    #[serde(default)]
    pub heat: Option<bool>,
    #[serde(default)]
    pub kitchen: Option<bool>,
    #[serde(default)]
    pub internet: Option<bool>,
    #[serde(default)]
    pub wifi: Option<bool>,
}

impl Amenities {
    pub fn get(&self, amenity: Amenity) -> Option<bool> {
        match amenity {
            Amenity::Essentials => self.essentials,
            Amenity::Tv => self.tv,
            Amenity::Cable => self.cable,
            Amenity::Ac => self.ac,
            Amenity::Heat => self.heat,
            Amenity::Kitchen => self.kitchen,
            Amenity::Internet => self.internet,
            Amenity::Wifi => self.wifi,
        }
    }

    fn slot(&mut self, amenity: Amenity) -> &mut Option<bool> {
        match amenity {
            Amenity::Essentials => &mut self.essentials,
            Amenity::Tv => &mut self.tv,
            Amenity::Cable => &mut self.cable,
            Amenity::Ac => &mut self.ac,
            Amenity::Heat => &mut self.heat,
            Amenity::Kitchen => &mut self.kitchen,
            Amenity::Internet => &mut self.internet,
            Amenity::Wifi => &mut self.wifi,
        }
    }

    pub fn set(&mut self, amenity: Amenity, value: bool) {
        *self.slot(amenity) = Some(value);
    }

    /// True only when the flag was explicitly set to true
    pub fn has(&self, amenity: Amenity) -> bool {
        self.get(amenity) == Some(true)
    }

    /// Flags set here win; unset ones fall back to `base`
    pub fn merged_over(&self, base: &Amenities) -> Amenities {
        let mut merged = base.clone();
        for amenity in Amenity::ALL {
            if let Some(value) = self.get(amenity) {
                merged.set(amenity, value);
            }
        }
        merged
    }

    /// Pre-save hook: unset flags become false, explicit values are kept
    pub fn apply_defaults(&mut self) {
        for amenity in Amenity::ALL {
            self.slot(amenity).get_or_insert(false);
        }
    }
}

/// A persisted, validated rental listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub home_type: HomeType,
    pub room_type: RoomType,
    pub accomodates: i32,
    pub term: String,
    pub city: String,
    pub price: i64,
    pub address: String,
    #[serde(flatten)]
    pub amenities: Amenities,
}

impl Listing {
    /// Labels of every amenity this listing offers, in display order
    pub fn amenities(&self) -> Vec<&'static str> {
        Amenity::ALL
            .iter()
            .filter(|amenity| self.amenities.has(**amenity))
            .map(Amenity::label)
            .collect()
    }
}

/// Unvalidated listing input, as submitted by the owning user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingDraft {
    pub owner_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub home_type: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub accomodates: Option<i32>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
}

/// A date interval during which a listing cannot be booked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnavailableRange {
    pub id: i64,
    pub listing_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Photo attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub id: i64,
    pub listing_id: i64,
    #[serde(skip_serializing, default)]
    pub attachment: Vec<u8>,
    pub cover: bool,
    pub created_at: DateTime<Utc>,
}

/// Photo not yet stored
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub listing_id: i64,
    pub attachment: Vec<u8>,
    pub cover: bool,
    pub created_at: DateTime<Utc>,
}

/// Unavailable range not yet stored
#[derive(Debug, Clone, Copy)]
pub struct NewUnavailableRange {
    pub listing_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
