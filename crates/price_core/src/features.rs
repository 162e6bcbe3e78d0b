//! Feature schema, derived features and feature-vector assembly
//!
//! The model is trained on eleven columns: the eight raw inputs collected by
//! the dashboard plus three ratios computed from them. Column names match
//! the training data exactly, so they double as the wire names in
//! `feature_info.json`.

use crate::errors::{PriceError, Result};
use crate::inputs::RawInputs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Ordered numeric array handed to the scaler and the model
pub type FeatureVector = Vec<f64>;

/// Every column the pipeline knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureName {
    MedInc,
    HouseAge,
    AveRooms,
    AveBedrms,
    Population,
    AveOccup,
    Latitude,
    Longitude,
    #[serde(rename = "rooms_per_person")]
    RoomsPerPerson,
    #[serde(rename = "bedrooms_per_room")]
    BedroomsPerRoom,
    #[serde(rename = "population_density")]
    PopulationDensity,
}

impl FeatureName {
    /// All columns, raw inputs first, in the order the training notebook
    /// appended them.
    pub const ALL: [FeatureName; 11] = [
        FeatureName::MedInc,
        FeatureName::HouseAge,
        FeatureName::AveRooms,
        FeatureName::AveBedrms,
        FeatureName::Population,
        FeatureName::AveOccup,
        FeatureName::Latitude,
        FeatureName::Longitude,
        FeatureName::RoomsPerPerson,
        FeatureName::BedroomsPerRoom,
        FeatureName::PopulationDensity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::MedInc => "MedInc",
            FeatureName::HouseAge => "HouseAge",
            FeatureName::AveRooms => "AveRooms",
            FeatureName::AveBedrms => "AveBedrms",
            FeatureName::Population => "Population",
            FeatureName::AveOccup => "AveOccup",
            FeatureName::Latitude => "Latitude",
            FeatureName::Longitude => "Longitude",
            FeatureName::RoomsPerPerson => "rooms_per_person",
            FeatureName::BedroomsPerRoom => "bedrooms_per_room",
            FeatureName::PopulationDensity => "population_density",
        }
    }

    /// True for the three ratio columns computed by [`derive`]
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            FeatureName::RoomsPerPerson
                | FeatureName::BedroomsPerRoom
                | FeatureName::PopulationDensity
        )
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                PriceError::ConfigurationMismatch(format!(
                    "feature '{s}' is not produced by the input pipeline"
                ))
            })
    }
}

/// Raw inputs plus the three engineered ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedInputs {
    #[serde(flatten)]
    pub raw: RawInputs,
    pub rooms_per_person: f64,
    pub bedrooms_per_room: f64,
    pub population_density: f64,
}

impl DerivedInputs {
    /// Value of a single column
    pub fn value(&self, feature: FeatureName) -> f64 {
        match feature {
            FeatureName::MedInc => self.raw.med_inc,
            FeatureName::HouseAge => f64::from(self.raw.house_age),
            FeatureName::AveRooms => self.raw.ave_rooms,
            FeatureName::AveBedrms => self.raw.ave_bedrms,
            FeatureName::Population => f64::from(self.raw.population),
            FeatureName::AveOccup => self.raw.ave_occup,
            FeatureName::Latitude => self.raw.latitude,
            FeatureName::Longitude => self.raw.longitude,
            FeatureName::RoomsPerPerson => self.rooms_per_person,
            FeatureName::BedroomsPerRoom => self.bedrooms_per_room,
            FeatureName::PopulationDensity => self.population_density,
        }
    }
}

/// Compute the engineered ratios
///
/// * `rooms_per_person = AveRooms / AveOccup`
/// * `bedrooms_per_room = AveBedrms / AveRooms`
/// * `population_density = Population / (AveOccup * 100)`
///
/// The slider ranges keep both denominators strictly positive. Callers
/// outside that surface get a [`PriceError::DomainViolation`] for a zero or
/// non-finite denominator instead of an infinite or NaN ratio.
pub fn derive(raw: &RawInputs) -> Result<DerivedInputs> {
    let rooms_per_person = ratio("rooms_per_person", "AveOccup", raw.ave_rooms, raw.ave_occup)?;
    let bedrooms_per_room =
        ratio("bedrooms_per_room", "AveRooms", raw.ave_bedrms, raw.ave_rooms)?;
    let population_density = ratio(
        "population_density",
        "AveOccup",
        f64::from(raw.population),
        raw.ave_occup * 100.0,
    )?;

    Ok(DerivedInputs {
        raw: *raw,
        rooms_per_person,
        bedrooms_per_room,
        population_density,
    })
}

fn ratio(
    field: &'static str,
    denominator: &'static str,
    numerator: f64,
    value: f64,
) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        return Err(PriceError::DomainViolation {
            field,
            denominator,
            value,
        });
    }
    Ok(numerator / value)
}

/// Resolve metadata column names against the known schema
///
/// Order is preserved. Unknown and repeated names are rejected.
pub fn resolve_feature_names(names: &[String]) -> Result<Vec<FeatureName>> {
    if names.is_empty() {
        return Err(PriceError::ConfigurationMismatch(
            "feature metadata lists no features".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            let feature = name.parse::<FeatureName>()?;
            if !seen.insert(feature) {
                return Err(PriceError::ConfigurationMismatch(format!(
                    "feature '{name}' is listed more than once"
                )));
            }
            Ok(feature)
        })
        .collect()
}

/// Build the feature vector in schema order
pub fn assemble_features(derived: &DerivedInputs, schema: &[FeatureName]) -> FeatureVector {
    schema.iter().map(|&feature| derived.value(feature)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_defaults() {
        let derived = derive(&RawInputs::default()).unwrap();

        assert!((derived.rooms_per_person - 2.0).abs() < 1e-12);
        assert!((derived.bedrooms_per_room - 1.1 / 6.0).abs() < 1e-12);
        assert!((derived.bedrooms_per_room - 0.1833).abs() < 1e-4);
        assert!((derived.population_density - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_derive_zero_occupancy_is_domain_violation() {
        let raw = RawInputs {
            ave_occup: 0.0,
            ..RawInputs::default()
        };

        match derive(&raw) {
            Err(PriceError::DomainViolation { denominator, .. }) => {
                assert_eq!(denominator, "AveOccup")
            }
            other => panic!("expected domain violation, got {other:?}"),
        }
    }

    #[test]
    fn test_derive_zero_rooms_is_domain_violation() {
        let raw = RawInputs {
            ave_rooms: 0.0,
            ..RawInputs::default()
        };

        match derive(&raw) {
            Err(PriceError::DomainViolation { field, denominator, .. }) => {
                assert_eq!(field, "bedrooms_per_room");
                assert_eq!(denominator, "AveRooms");
            }
            other => panic!("expected domain violation, got {other:?}"),
        }
    }

    #[test]
    fn test_derive_nan_denominator_rejected() {
        let raw = RawInputs {
            ave_occup: f64::NAN,
            ..RawInputs::default()
        };
        assert!(derive(&raw).is_err());
    }

    #[test]
    fn test_feature_name_round_trip_through_str() {
        for feature in FeatureName::ALL {
            assert_eq!(feature.as_str().parse::<FeatureName>().unwrap(), feature);
        }
        assert!("rooms".parse::<FeatureName>().is_err());
    }

    #[test]
    fn test_feature_name_serde_matches_as_str() {
        for feature in FeatureName::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.as_str()));
        }
    }

    #[test]
    fn test_only_ratios_are_derived() {
        let derived: Vec<_> = FeatureName::ALL.iter().filter(|f| f.is_derived()).collect();
        assert_eq!(derived.len(), 3);
    }

    #[test]
    fn test_assemble_follows_schema_order() {
        let derived = derive(&RawInputs::default()).unwrap();
        let schema = vec![
            FeatureName::PopulationDensity,
            FeatureName::MedInc,
            FeatureName::Longitude,
            FeatureName::HouseAge,
        ];

        let vector = assemble_features(&derived, &schema);
        assert_eq!(vector.len(), 4);
        assert!((vector[0] - 10.0).abs() < 1e-12);
        assert_eq!(vector[1], 5.0);
        assert_eq!(vector[2], -118.0);
        assert_eq!(vector[3], 20.0);
    }

    #[test]
    fn test_resolve_rejects_unknown_name() {
        let err = resolve_feature_names(&names(&["MedInc", "Bedrooms"])).unwrap_err();
        assert!(matches!(err, PriceError::ConfigurationMismatch(_)));
        assert!(err.to_string().contains("Bedrooms"));
    }

    #[test]
    fn test_resolve_rejects_duplicates_and_empty() {
        assert!(resolve_feature_names(&names(&["MedInc", "MedInc"])).is_err());
        assert!(resolve_feature_names(&[]).is_err());
    }

    #[test]
    fn test_assemble_accepts_subset() {
        let derived = derive(&RawInputs::default()).unwrap();
        let schema = resolve_feature_names(&names(&["rooms_per_person", "AveOccup"])).unwrap();
        let vector = assemble_features(&derived, &schema);
        assert_eq!(vector, vec![2.0, 3.0]);
    }
}
