//! Raw dashboard inputs and the bounds of the input surface

use crate::errors::{PriceError, Result};
use crate::features::FeatureName;
use serde::{Deserialize, Serialize};

/// Slider definition for one raw input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputSpec {
    pub feature: FeatureName,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// Whole-number input (house age, population)
    pub integer: bool,
}

impl InputSpec {
    const fn decimal(
        feature: FeatureName,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
        step: f64,
    ) -> Self {
        Self {
            feature,
            label,
            min,
            max,
            default,
            step,
            integer: false,
        }
    }

    const fn whole(
        feature: FeatureName,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
        step: f64,
    ) -> Self {
        Self {
            feature,
            label,
            min,
            max,
            default,
            step,
            integer: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Sliders in display order
pub const INPUT_SPECS: [InputSpec; 8] = [
    InputSpec::decimal(FeatureName::MedInc, "Median Income (in $10k)", 0.5, 15.0, 5.0, 0.1),
    InputSpec::whole(FeatureName::HouseAge, "House Age (years)", 1.0, 50.0, 20.0, 1.0),
    InputSpec::decimal(FeatureName::AveRooms, "Average Rooms", 3.0, 12.0, 6.0, 0.1),
    InputSpec::decimal(FeatureName::AveBedrms, "Average Bedrooms", 0.5, 3.0, 1.1, 0.1),
    InputSpec::whole(FeatureName::Population, "Population", 500.0, 10000.0, 3000.0, 100.0),
    InputSpec::decimal(FeatureName::AveOccup, "Average Occupancy", 1.0, 8.0, 3.0, 0.1),
    InputSpec::decimal(FeatureName::Latitude, "Latitude", 32.0, 42.0, 34.0, 0.1),
    InputSpec::decimal(FeatureName::Longitude, "Longitude", -125.0, -114.0, -118.0, 0.1),
];

/// One set of slider values, named after the training columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Median income of the block group, in $10k
    #[serde(rename = "MedInc")]
    pub med_inc: f64,
    /// Median house age in years
    #[serde(rename = "HouseAge")]
    pub house_age: u32,
    #[serde(rename = "AveRooms")]
    pub ave_rooms: f64,
    #[serde(rename = "AveBedrms")]
    pub ave_bedrms: f64,
    #[serde(rename = "Population")]
    pub population: u32,
    /// Average household members
    #[serde(rename = "AveOccup")]
    pub ave_occup: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            med_inc: 5.0,
            house_age: 20,
            ave_rooms: 6.0,
            ave_bedrms: 1.1,
            population: 3000,
            ave_occup: 3.0,
            latitude: 34.0,
            longitude: -118.0,
        }
    }
}

impl RawInputs {
    /// Value of a raw column; `None` for engineered columns
    pub fn value(&self, feature: FeatureName) -> Option<f64> {
        let value = match feature {
            FeatureName::MedInc => self.med_inc,
            FeatureName::HouseAge => f64::from(self.house_age),
            FeatureName::AveRooms => self.ave_rooms,
            FeatureName::AveBedrms => self.ave_bedrms,
            FeatureName::Population => f64::from(self.population),
            FeatureName::AveOccup => self.ave_occup,
            FeatureName::Latitude => self.latitude,
            FeatureName::Longitude => self.longitude,
            _ => return None,
        };
        Some(value)
    }

    /// Enforce the slider ranges. The pipeline itself never calls this; it
    /// belongs to whichever surface accepts the values.
    pub fn check_bounds(&self) -> Result<()> {
        for spec in INPUT_SPECS.iter() {
            let Some(value) = self.value(spec.feature) else {
                continue;
            };
            if !spec.contains(value) {
                return Err(PriceError::OutOfRange {
                    field: spec.feature.as_str(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_slider_table() {
        let raw = RawInputs::default();
        for spec in INPUT_SPECS.iter() {
            assert_eq!(raw.value(spec.feature), Some(spec.default), "{}", spec.feature);
        }
    }

    #[test]
    fn test_defaults_within_bounds() {
        assert!(RawInputs::default().check_bounds().is_ok());
    }

    #[test]
    fn test_slider_table_covers_every_raw_column() {
        let raw_columns: Vec<_> = FeatureName::ALL
            .iter()
            .filter(|f| !f.is_derived())
            .copied()
            .collect();
        let spec_columns: Vec<_> = INPUT_SPECS.iter().map(|s| s.feature).collect();
        assert_eq!(raw_columns, spec_columns);
    }

    #[test]
    fn test_out_of_range_reports_field() {
        let raw = RawInputs {
            longitude: -113.0,
            ..RawInputs::default()
        };

        match raw.check_bounds() {
            Err(PriceError::OutOfRange { field, min, max, .. }) => {
                assert_eq!(field, "Longitude");
                assert_eq!(min, -125.0);
                assert_eq!(max, -114.0);
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let raw = RawInputs {
            med_inc: f64::NAN,
            ..RawInputs::default()
        };
        assert!(raw.check_bounds().is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let raw = RawInputs {
            med_inc: 15.0,
            house_age: 1,
            population: 10000,
            ave_occup: 1.0,
            ..RawInputs::default()
        };
        assert!(raw.check_bounds().is_ok());
    }

    #[test]
    fn test_deserialize_uses_column_names() {
        let json = r#"{
            "MedInc": 8.3, "HouseAge": 41, "AveRooms": 6.9, "AveBedrms": 1.0,
            "Population": 500, "AveOccup": 2.5, "Latitude": 37.9, "Longitude": -122.2
        }"#;
        let raw: RawInputs = serde_json::from_str(json).unwrap();
        assert_eq!(raw.house_age, 41);
        assert_eq!(raw.longitude, -122.2);
    }
}
