//! Business identity captured during step 2 of an inspection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Capital ownership status of the inspected business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CapitalStatus {
    /// Domestic investment (PMDN).
    #[default]
    Domestic,
    /// Foreign investment (PMA).
    Foreign,
    /// State-owned enterprise (BUMN).
    StateOwned,
    /// Any other free-text status.
    Other(String),
}

impl CapitalStatus {
    pub fn code(&self) -> &str {
        match self {
            Self::Domestic => "PMDN",
            Self::Foreign => "PMA",
            Self::StateOwned => "BUMN",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for CapitalStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PMDN" => Self::Domestic,
            "PMA" => Self::Foreign,
            "BUMN" => Self::StateOwned,
            _ => Self::Other(value),
        }
    }
}

impl From<CapitalStatus> for String {
    fn from(value: CapitalStatus) -> Self {
        value.code().to_string()
    }
}

/// A GPS fix. Latitude and longitude only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEntity {
    pub name: String,
    #[serde(rename = "type", default)]
    pub business_type: String,
    /// KBLI sector classification code.
    #[serde(rename = "kbli", default)]
    pub sector_code: String,
    #[serde(default)]
    pub operating_year: String,
    #[serde(default)]
    pub capital_status: CapitalStatus,
    #[serde(default)]
    pub responsible_person: String,
    #[serde(default)]
    pub responsible_title: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(with = "coordinate_pair", default)]
    coordinates: Option<Coordinates>,
    /// Inspection date, `YYYY-MM-DD`.
    #[serde(rename = "date", default)]
    pub inspection_date: String,
    /// Inspection time, `HH:MM`.
    #[serde(rename = "time", default)]
    pub inspection_time: String,
}

impl BusinessEntity {
    /// A blank entity stamped with the given local date and time.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            inspection_date: now.format("%Y-%m-%d").to_string(),
            inspection_time: now.format("%H:%M").to_string(),
            ..Self::default()
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Store a GPS fix. Both halves are written in one assignment.
    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    pub fn clear_coordinates(&mut self) {
        self.coordinates = None;
    }
}

/// Snapshot representation: `{"latitude": f64|null, "longitude": f64|null}`.
mod coordinate_pair {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Coordinates;

    #[derive(Serialize, Deserialize, Default)]
    struct Pair {
        latitude: Option<f64>,
        longitude: Option<f64>,
    }

    pub fn serialize<S: Serializer>(
        value: &Option<Coordinates>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let pair = Pair {
            latitude: value.map(|c| c.latitude),
            longitude: value.map(|c| c.longitude),
        };
        pair.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Coordinates>, D::Error> {
        let pair = Option::<Pair>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match (pair.latitude, pair.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn starting_at_stamps_date_and_time() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 5, 44)
            .unwrap();
        let business = BusinessEntity::starting_at(now);
        assert_eq!(business.inspection_date, "2024-05-17");
        assert_eq!(business.inspection_time, "09:05");
        assert_eq!(business.capital_status, CapitalStatus::Domestic);
        assert!(business.coordinates().is_none());
    }

    #[test]
    fn capital_status_codes() {
        assert_eq!(CapitalStatus::from("pma".to_string()), CapitalStatus::Foreign);
        assert_eq!(
            CapitalStatus::from("Koperasi".to_string()),
            CapitalStatus::Other("Koperasi".into())
        );
        assert_eq!(String::from(CapitalStatus::StateOwned), "BUMN");
    }

    #[test]
    fn half_a_coordinate_pair_is_dropped() {
        let json = r#"{"name":"PT A","coordinates":{"latitude":-6.2,"longitude":null}}"#;
        let business: BusinessEntity = serde_json::from_str(json).unwrap();
        assert!(business.coordinates().is_none());
    }

    #[test]
    fn unset_coordinates_serialize_as_nulls() {
        let business = BusinessEntity::default();
        let json = serde_json::to_value(&business).unwrap();
        assert!(json["coordinates"]["latitude"].is_null());
        assert!(json["coordinates"]["longitude"].is_null());
    }
}
