//! Property record types
//!
//! The durable record owned by the store, the projection the listing cache
//! holds, and the fixed-point `Price` both of them carry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CacheError;

/// Maximum total digits of a price (two of them fractional).
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Largest gap, in cents, between a float price and its nearest cent.
const CENT_TOLERANCE: f64 = 1e-3;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum location length in characters.
pub const MAX_LOCATION_LENGTH: usize = 100;

// == Price ==
/// Non-negative monetary amount stored as integer cents.
///
/// Serializes as a decimal string with two fractional digits (`"2500000.00"`)
/// and deserializes from either such a string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    /// Largest representable price, `99999999.99`.
    pub const MAX: Price = Price(10u64.pow(PRICE_MAX_DIGITS) - 1);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    fn checked(cents: u64) -> Result<Self, CacheError> {
        if cents > Self::MAX.0 {
            return Err(out_of_range());
        }
        Ok(Self(cents))
    }

    fn from_f64(value: f64) -> Result<Self, CacheError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CacheError::InvalidRequest(
                "Price must be a non-negative number".to_string(),
            ));
        }
        let scaled = value * 100.0;
        let cents = scaled.round();
        // Tolerates binary representation error, not a third decimal place
        if (scaled - cents).abs() > CENT_TOLERANCE {
            return Err(CacheError::InvalidRequest(
                "Price must have at most 2 decimal places".to_string(),
            ));
        }
        if cents > Self::MAX.0 as f64 {
            return Err(out_of_range());
        }
        Ok(Self(cents as u64))
    }
}

fn out_of_range() -> CacheError {
    CacheError::InvalidRequest(format!("Price exceeds {} digits", PRICE_MAX_DIGITS))
}

impl FromStr for Price {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CacheError::InvalidRequest(format!("Invalid price: '{}'", s));
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<u64>().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;
        Self::checked(cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(units) => units
                .checked_mul(100)
                .ok_or_else(|| de::Error::custom("price out of range"))
                .and_then(|cents| Price::checked(cents).map_err(de::Error::custom)),
            Raw::Float(value) => Price::from_f64(value).map_err(de::Error::custom),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

// == Property ==
/// A property record as committed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    /// Set once on creation, never modified
    pub created_at: DateTime<Utc>,
}

// == Property Summary ==
/// The projection of a `Property` served by the listing and held in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Property> for PropertySummary {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price,
            location: property.location.clone(),
            created_at: property.created_at,
        }
    }
}

// == New Property ==
/// Fields supplied when creating a record; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProperty {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl NewProperty {
    /// Validates the field constraints.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_title(&self.title).or_else(|| validate_location(&self.location))
    }
}

// == Property Patch ==
/// A partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub location: Option<String>,
}

impl PropertyPatch {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Option<String> {
        self.title
            .as_deref()
            .and_then(validate_title)
            .or_else(|| self.location.as_deref().and_then(validate_location))
    }

    /// Applies the present fields to `property`.
    pub fn apply(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(location) = self.location {
            property.location = location;
        }
    }
}

fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return Some("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Some(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    None
}

fn validate_location(location: &str) -> Option<String> {
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Some(format!(
            "Location exceeds maximum length of {} characters",
            MAX_LOCATION_LENGTH
        ));
    }
    None
}
