//! Prediction core for the California house price dashboard
//!
//! Turns slider values into a price estimate using a pre-trained linear
//! regression model, and shapes the payloads the dashboard renders around
//! it.
//!
//! Modules:
//! - `inputs`: raw slider values and their documented ranges
//! - `features`: feature schema, engineered ratios and vector assembly
//! - `model`: linear model, standard scaler and feature metadata artifacts
//! - `artifacts`: load-once artifact store with a disabled state
//! - `pipeline`: scale + infer for one sample
//! - `report`: comparison, importance, summary and model card payloads
//! - `errors`: error taxonomy

pub mod artifacts;
pub mod errors;
pub mod features;
pub mod inputs;
pub mod model;
pub mod pipeline;
pub mod report;

pub use artifacts::{ArtifactPaths, ArtifactState, ArtifactStore, Artifacts};
pub use errors::{PriceError, Result};
pub use features::{
    assemble_features, derive, resolve_feature_names, DerivedInputs, FeatureName, FeatureVector,
};
pub use inputs::{InputSpec, RawInputs, INPUT_SPECS};
pub use model::{FeatureInfo, LinearModel, StandardScaler};
pub use pipeline::{predict, run, PredictionResult};
pub use report::{
    comparison_rows, ComparisonRow, DashboardView, Impact, ImportanceRow, InputSummary,
    ModelCard, PredictionReport, Series, IMPORTANCE_ROWS, MODEL_CARD,
};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle one explicit trigger against whatever the store loaded
///
/// With unavailable artifacts the pipeline is not entered and the panel
/// stays idle with prediction disabled.
pub fn trigger(state: &ArtifactState, raw: &RawInputs) -> Result<DashboardView> {
    match state {
        ArtifactState::Loaded(artifacts) => Ok(DashboardView::Predicted {
            report: run(raw, artifacts)?,
        }),
        ArtifactState::Unavailable { .. } => Ok(idle_view(state)),
    }
}

/// Panel state before any trigger
pub fn idle_view(state: &ArtifactState) -> DashboardView {
    match state {
        ArtifactState::Loaded(_) => DashboardView::awaiting_trigger(),
        ArtifactState::Unavailable { .. } => DashboardView::disabled(
            "Model files are not available. Predictions are disabled until the artifacts are restored.",
        ),
    }
}
