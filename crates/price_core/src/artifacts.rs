//! Artifact loading
//!
//! The model, scaler and feature metadata are read once per process. Read
//! and decode failures never escape the loader: they turn into
//! [`ArtifactState::Unavailable`] so the dashboard can render a disabled
//! prediction panel. Artifacts that decode fine but disagree with each other
//! are a broken deployment and surface as
//! [`PriceError::ConfigurationMismatch`].

use crate::errors::{PriceError, Result};
use crate::features::{resolve_feature_names, FeatureName};
use crate::model::{FeatureInfo, LinearModel, StandardScaler};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_MODEL_FILE: &str = "house_price_model.json";
pub const DEFAULT_SCALER_FILE: &str = "house_price_scaler.json";
pub const DEFAULT_FEATURE_INFO_FILE: &str = "feature_info.json";

/// Where the three artifact files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub feature_info_file: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir("models")
    }
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            feature_info_file: DEFAULT_FEATURE_INFO_FILE.to_string(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    pub fn feature_info_path(&self) -> PathBuf {
        self.dir.join(&self.feature_info_file)
    }
}

/// A consistent (model, scaler, feature metadata) triple
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    model: LinearModel,
    scaler: StandardScaler,
    feature_info: FeatureInfo,
    schema: Vec<FeatureName>,
}

impl Artifacts {
    /// Assemble and cross-check the three artifacts
    ///
    /// Every metadata name must be a known column, and scaler and model must
    /// both expect exactly as many features as the metadata lists.
    pub fn new(
        model: LinearModel,
        scaler: StandardScaler,
        feature_info: FeatureInfo,
    ) -> Result<Self> {
        let schema = resolve_feature_names(&feature_info.feature_names)?;
        scaler.validate()?;
        model.validate()?;

        if scaler.feature_count() != schema.len() {
            return Err(PriceError::ConfigurationMismatch(format!(
                "feature metadata lists {} features but the scaler was fitted on {}",
                schema.len(),
                scaler.feature_count()
            )));
        }
        if model.feature_count() != schema.len() {
            return Err(PriceError::ConfigurationMismatch(format!(
                "feature metadata lists {} features but the model has {} coefficients",
                schema.len(),
                model.feature_count()
            )));
        }

        Ok(Self {
            model,
            scaler,
            feature_info,
            schema,
        })
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn feature_info(&self) -> &FeatureInfo {
        &self.feature_info
    }

    /// Resolved column order
    pub fn schema(&self) -> &[FeatureName] {
        &self.schema
    }
}

/// Outcome of loading the artifacts
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactState {
    Loaded(Artifacts),
    Unavailable { reason: String },
}

impl ArtifactState {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ArtifactState::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        match self {
            ArtifactState::Loaded(artifacts) => Some(artifacts),
            ArtifactState::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactState::Loaded(_))
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            ArtifactState::Loaded(_) => "loaded",
            ArtifactState::Unavailable { .. } => "unavailable",
        }
    }
}

/// Cached load outcome; `Err` holds the detail of a configuration mismatch
type LoadOutcome = std::result::Result<ArtifactState, String>;

/// Loads the artifacts on first use and keeps the outcome for the process
/// lifetime
#[derive(Debug)]
pub struct ArtifactStore {
    paths: ArtifactPaths,
    state: OnceCell<LoadOutcome>,
}

impl ArtifactStore {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            state: OnceCell::new(),
        }
    }

    /// Store that already holds a state; never touches disk
    pub fn with_state(paths: ArtifactPaths, state: ArtifactState) -> Self {
        Self {
            paths,
            state: OnceCell::with_value(Ok(state)),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load (once) and return the artifact state
    ///
    /// Read and decode failures become [`ArtifactState::Unavailable`]. A
    /// cross-artifact mismatch is returned as an error, and the same error
    /// is returned on every later call.
    pub fn load(&self) -> Result<&ArtifactState> {
        let outcome = self.state.get_or_init(|| match self.read_artifacts() {
            Ok(state) => Ok(state),
            Err(PriceError::ConfigurationMismatch(detail)) => Err(detail),
            Err(err) => Ok(unavailable(err)),
        });
        outcome
            .as_ref()
            .map_err(|detail| PriceError::ConfigurationMismatch(detail.clone()))
    }

    fn read_artifacts(&self) -> Result<ArtifactState> {
        let model: LinearModel = read_artifact(&self.paths.model_path())?;
        let scaler: StandardScaler = read_artifact(&self.paths.scaler_path())?;
        let feature_info: FeatureInfo = read_artifact(&self.paths.feature_info_path())?;

        let artifacts = Artifacts::new(model, scaler, feature_info)?;
        info!(
            "Loaded artifacts from {} ({} features)",
            self.paths.dir.display(),
            artifacts.schema().len()
        );
        Ok(ArtifactState::Loaded(artifacts))
    }
}

fn unavailable(err: PriceError) -> ArtifactState {
    warn!("Prediction disabled: {}", err);
    ArtifactState::unavailable(err.to_string())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    decode_file(path)
        .map_err(|err| PriceError::ArtifactUnavailable(format!("{}: {err}", path.display())))
}

fn decode_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<&'static str> {
        FeatureName::ALL.iter().map(|f| f.as_str()).collect()
    }

    #[test]
    fn test_artifacts_accept_consistent_triple() {
        let artifacts = Artifacts::new(
            LinearModel::constant(11, 2.0),
            StandardScaler::identity(11),
            FeatureInfo::new(names()),
        )
        .unwrap();
        assert_eq!(artifacts.schema(), &FeatureName::ALL[..]);
    }

    #[test]
    fn test_artifacts_reject_scaler_length() {
        let err = Artifacts::new(
            LinearModel::constant(11, 2.0),
            StandardScaler::identity(10),
            FeatureInfo::new(names()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("scaler"));
    }

    #[test]
    fn test_artifacts_reject_model_length() {
        let err = Artifacts::new(
            LinearModel::constant(3, 2.0),
            StandardScaler::identity(11),
            FeatureInfo::new(names()),
        )
        .unwrap_err();
        assert!(matches!(err, PriceError::ConfigurationMismatch(_)));
    }

    #[test]
    fn test_artifacts_reject_unknown_feature() {
        let err = Artifacts::new(
            LinearModel::constant(2, 2.0),
            StandardScaler::identity(2),
            FeatureInfo::new(["MedInc", "ocean_proximity"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("ocean_proximity"));
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let store = ArtifactStore::new(ArtifactPaths::in_dir("/nonexistent/house-price"));
        let state = store.load().unwrap();
        assert!(!state.is_loaded());
        assert_eq!(state.status_label(), "unavailable");
        assert!(state.artifacts().is_none());
    }

    #[test]
    fn test_with_state_skips_disk() {
        let store = ArtifactStore::with_state(
            ArtifactPaths::in_dir("/nonexistent"),
            ArtifactState::unavailable("not configured"),
        );
        match store.load().unwrap() {
            ArtifactState::Unavailable { reason } => assert_eq!(reason, "not configured"),
            ArtifactState::Loaded(_) => panic!("expected unavailable"),
        }
    }

    #[test]
    fn test_decode_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_MODEL_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = read_artifact::<LinearModel>(&path).unwrap_err();
        assert!(matches!(err, PriceError::ArtifactUnavailable(_)));
        assert!(err.to_string().contains(DEFAULT_MODEL_FILE));
        assert!(matches!(
            decode_file::<LinearModel>(&path),
            Err(PriceError::Serialization(_))
        ));
        assert!(matches!(
            decode_file::<LinearModel>(&dir.path().join("missing.json")),
            Err(PriceError::Io(_))
        ));
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.model_path(), PathBuf::from("models/house_price_model.json"));
        assert_eq!(paths.feature_info_path(), PathBuf::from("models/feature_info.json"));
    }
}
