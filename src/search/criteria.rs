use crate::models::{Amenities, Amenity, HomeType, RoomType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Search criteria for listings. Every field is optional; unset fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchCriteria {
    /// City, compared case-insensitively
    pub city: Option<String>,
    /// Minimum guest capacity
    pub accomodates: Option<i32>,
    pub room_type: Option<RoomType>,
    /// Lower price bound. Only used together with `high_price`.
    pub low_price: Option<i64>,
    /// Upper price bound. Only used together with `low_price`.
    pub high_price: Option<i64>,
    pub term: Option<String>,
    pub home_type: Option<HomeType>,
    /// Required amenities. Only flags set to true restrict results.
    #[serde(flatten)]
    pub amenities: Amenities,
    /// Start of the requested stay. Only used together with `end`.
    pub start: Option<NaiveDate>,
    /// End of the requested stay. Only used together with `start`.
    pub end: Option<NaiveDate>,
}

impl SearchCriteria {
    /// Build criteria from a flat, loosely-typed parameter bag such as a decoded
    /// query string. Blank and unparseable values are treated as not set.
    pub fn from_params(params: &Map<String, Value>) -> Self {
        let mut amenities = Amenities::default();
        for amenity in Amenity::ALL {
            if let Some(value) = field(params, amenity.key(), flag) {
                amenities.set(amenity, value);
            }
        }

        Self {
            city: field(params, "city", text),
            accomodates: field(params, "accomodates", integer)
                .and_then(|n| i32::try_from(n).ok()),
            room_type: field(params, "room_type", |v| text(v)?.parse().ok()),
            low_price: field(params, "low_price", integer),
            high_price: field(params, "high_price", integer),
            term: field(params, "term", text),
            home_type: field(params, "home_type", |v| text(v)?.parse().ok()),
            amenities,
            start: field(params, "start", date),
            end: field(params, "end", date),
        }
    }

    /// Both price bounds, when both are given
    pub fn price_range(&self) -> Option<(i64, i64)> {
        self.low_price.zip(self.high_price)
    }

    /// Both stay dates, when both are given
    pub fn stay(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

fn field<T>(
    params: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = params.get(key)?;
    if is_blank(value) {
        return None;
    }

    let parsed = parse(value);
    if parsed.is_none() {
        debug!("Ignoring malformed search parameter {}={}", key, value);
    }
    parsed
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}
