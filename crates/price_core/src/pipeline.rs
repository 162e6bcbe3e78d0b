//! Prediction pipeline: project → scale → infer

use crate::artifacts::Artifacts;
use crate::errors::Result;
use crate::features::{assemble_features, derive, DerivedInputs};
use crate::inputs::RawInputs;
use crate::report::PredictionReport;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Model output, in units of $100,000
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub value: f64,
}

impl PredictionResult {
    /// Price in thousands of dollars
    pub fn price_thousands(&self) -> f64 {
        self.value * 100.0
    }

    /// `$<thousands>k`, rounded to whole thousands
    pub fn display_price(&self) -> String {
        format!("${:.0}k", self.price_thousands())
    }
}

/// Run one sample through the scaler and the model
///
/// Taking `&Artifacts` means the caller has already matched on
/// [`crate::ArtifactState::Loaded`]; there is no disabled path in here.
#[instrument(level = "debug", skip_all)]
pub fn predict(derived: &DerivedInputs, artifacts: &Artifacts) -> Result<PredictionResult> {
    let features = assemble_features(derived, artifacts.schema());
    let scaled = artifacts.scaler().transform(&features)?;
    let value = artifacts.model().predict(&scaled)?;
    debug!(value, "prediction computed");
    Ok(PredictionResult { value })
}

/// Derive, predict and shape the display payload for one trigger
pub fn run(raw: &RawInputs, artifacts: &Artifacts) -> Result<PredictionReport> {
    let derived = derive(raw)?;
    let prediction = predict(&derived, artifacts)?;
    Ok(PredictionReport::new(&derived, prediction))
}
