//! The public service record.
//!
//! Field set matches the directory feed format: optional fields default
//! so older exports without phone/hours/created_at still load.

use crate::geo::GeoPoint;
use crate::ranker::Candidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of service a provider offers.
///
/// Serialized as the feed's lowercase labels ("food bank", "clinic", ...).
/// Feed parsing is lenient: unrecognized labels become `Other`, so one
/// mislabeled record can't sink a whole directory load. CLI parsing via
/// [`FromStr`] stays strict and reports the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceCategory {
    FoodBank,
    Shelter,
    Clinic,
    RecyclingCenter,
    Education,
    Employment,
    Transportation,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 8] = [
        Self::FoodBank,
        Self::Shelter,
        Self::Clinic,
        Self::RecyclingCenter,
        Self::Education,
        Self::Employment,
        Self::Transportation,
        Self::Other,
    ];
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FoodBank => "food bank",
            Self::Shelter => "shelter",
            Self::Clinic => "clinic",
            Self::RecyclingCenter => "recycling center",
            Self::Education => "education",
            Self::Employment => "employment",
            Self::Transportation => "transportation",
            Self::Other => "other",
        };
        write!(f, "{}", label)
    }
}

impl From<String> for ServiceCategory {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Other)
    }
}

impl From<ServiceCategory> for String {
    fn from(category: ServiceCategory) -> String {
        category.to_string()
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.to_lowercase().as_str() {
            "food bank" | "foodbank" | "food-bank" => Self::FoodBank,
            "shelter" => Self::Shelter,
            "clinic" => Self::Clinic,
            "recycling center" | "recycling" => Self::RecyclingCenter,
            "education" => Self::Education,
            "employment" => Self::Employment,
            "transportation" | "transport" => Self::Transportation,
            "other" => Self::Other,
            _ => {
                return Err(format!(
                    "Unknown category '{}'. Known: food bank, shelter, clinic, recycling center, \
                     education, employment, transportation, other",
                    s
                ))
            }
        };
        Ok(category)
    }
}

/// A service provider entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    /// Coordinates are independently optional: plenty of real entries
    /// have an address but were never geocoded.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Service {
    /// Position of this service, if both coordinates are present.
    /// The point is not range-checked here; the ranker does that.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Borrowing candidate for distance ranking.
    pub fn candidate(&self) -> Candidate<&Service> {
        Candidate { payload: self, location: self.location() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_labels() {
        for category in ServiceCategory::ALL {
            assert_eq!(category.to_string().parse::<ServiceCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_category_parse_unknown() {
        assert!("laundromat".parse::<ServiceCategory>().is_err());
        assert_eq!("Food Bank".parse::<ServiceCategory>(), Ok(ServiceCategory::FoodBank));
    }

    #[test]
    fn test_deserialize_feed_entry() {
        let json = r#"{
            "id": 3,
            "name": "Health First Clinic Malaysia",
            "category": "clinic",
            "description": "Free medical consultations for low-income families",
            "address": "789 Jalan Petaling, Kuala Lumpur, Malaysia",
            "latitude": 3.1439,
            "longitude": 101.6988,
            "rating": 4.5,
            "is_approved": true
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.category, ServiceCategory::Clinic);
        assert_eq!(service.location(), Some(GeoPoint::new(3.1439, 101.6988)));
        assert!(service.phone.is_none());
    }

    #[test]
    fn test_deserialize_unknown_category_falls_back() {
        let json = r#"{"name": "Mystery Desk", "category": "laundromat"}"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.category, ServiceCategory::Other);
    }

    #[test]
    fn test_missing_coordinate_means_no_location() {
        let json = r#"{"name": "No Geo", "category": "shelter", "latitude": 3.14}"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert!(service.location().is_none());
        assert!(service.candidate().location.is_none());
    }
}
