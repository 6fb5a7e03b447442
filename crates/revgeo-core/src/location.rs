//! Resolved-place value types.
//!
//! A [`LocationRecord`] is the atomic unit that flows from the resolver into
//! the state slots. Records are never mutated after construction; a slot
//! update always swaps in a whole new record.

use serde::Serialize;

use crate::CoreError;

/// Summary text used whenever no encyclopedia extract is available.
pub const DEFAULT_SUMMARY: &str = "No Wikipedia article found for this city.";

/// A WGS84 point. `lat` in [-90, 90], `lng` in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Coordinates of the fallback location (Marina Gardens Drive, Singapore).
    pub const FALLBACK: Coordinates = Coordinates::new_unchecked(1.275_600_5, 103.861_952_8);

    /// Creates a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] if either component is not
    /// finite or lies outside its valid range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidCoordinates {
            lat,
            lng,
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }
        Ok(Self { lat, lng })
    }

    /// Creates a coordinate pair without range checks. Only for constants.
    #[must_use]
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A normalized postal address. Every field is optional; `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
}

impl Address {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.city.is_none()
            && self.street.is_none()
            && self.street_number.is_none()
    }
}

/// A fully resolved place: coordinates, address and a short summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub coordinates: Coordinates,
    pub address: Address,
    pub summary: String,
}

impl LocationRecord {
    /// The record that stands in whenever resolution fails and that every
    /// state slot holds before its first write.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            coordinates: Coordinates::FALLBACK,
            address: Address {
                country: Some("Singapore".to_string()),
                city: Some("Singapore".to_string()),
                street: Some("Marina Gardens Drive".to_string()),
                street_number: Some("1".to_string()),
            },
            summary: DEFAULT_SUMMARY.to_string(),
        }
    }

    /// Title shown on a map marker popup.
    #[must_use]
    pub fn title(&self) -> &str {
        self.address.city.as_deref().unwrap_or("Unknown place")
    }
}

impl Default for LocationRecord {
    fn default() -> Self {
        Self::fallback()
    }
}

/// One of the three named cells of shared location state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Current,
    Origin,
    Destination,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Current, Slot::Origin, Slot::Destination];
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Current => write!(f, "current"),
            Slot::Origin => write!(f, "origin"),
            Slot::Destination => write!(f, "destination"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_range_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range_latitude() {
        let err = Coordinates::new(90.5, 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinates { .. }));
    }

    #[test]
    fn coordinates_reject_out_of_range_longitude() {
        assert!(Coordinates::new(0.0, -180.01).is_err());
    }

    #[test]
    fn coordinates_reject_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn fallback_record_is_singapore_with_default_summary() {
        let record = LocationRecord::fallback();
        assert_eq!(record.coordinates, Coordinates::FALLBACK);
        assert_eq!(record.address.city.as_deref(), Some("Singapore"));
        assert_eq!(record.summary, DEFAULT_SUMMARY);
        assert_eq!(record, LocationRecord::default());
    }

    #[test]
    fn title_falls_back_when_city_missing() {
        let record = LocationRecord {
            coordinates: Coordinates::new_unchecked(0.0, 0.0),
            address: Address::default(),
            summary: DEFAULT_SUMMARY.to_string(),
        };
        assert_eq!(record.title(), "Unknown place");
    }

    #[test]
    fn address_serializes_without_missing_fields() {
        let address = Address {
            city: Some("Konstanz".to_string()),
            country: Some("Germany".to_string()),
            ..Address::default()
        };
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "city": "Konstanz", "country": "Germany" })
        );
    }

    #[test]
    fn slot_display_is_lowercase() {
        assert_eq!(Slot::Destination.to_string(), "destination");
    }
}
