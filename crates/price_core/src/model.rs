//! Pre-fit artifacts: linear regression model, standard scaler and feature
//! metadata
//!
//! All three are produced by the training notebook and exported as JSON.
//! This crate only deserializes and evaluates them.

use crate::errors::{PriceError, Result};
use serde::{Deserialize, Serialize};

/// Ordinary least squares model: `intercept + coefficients · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One weight per feature, in feature-metadata order
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Model that ignores its input and always predicts `value`
    pub fn constant(feature_count: usize, value: f64) -> Self {
        Self::new(vec![0.0; feature_count], value)
    }

    /// Number of input features expected
    pub fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Validate the model structure
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(PriceError::ConfigurationMismatch(
                "model has no coefficients".to_string(),
            ));
        }
        if !self.intercept.is_finite() {
            return Err(PriceError::ConfigurationMismatch(
                "model intercept is not finite".to_string(),
            ));
        }
        if let Some(index) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(PriceError::ConfigurationMismatch(format!(
                "model coefficient {index} is not finite"
            )));
        }
        Ok(())
    }

    /// Predict a single sample
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(PriceError::ConfigurationMismatch(format!(
                "model expects {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }
}

/// Standardisation fitted on the training set: `(x - mean) / scale`
///
/// A zero scale marks a constant training column; it is treated as 1 so the
/// column is only centred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Scaler that leaves every value unchanged
    pub fn identity(feature_count: usize) -> Self {
        Self::new(vec![0.0; feature_count], vec![1.0; feature_count])
    }

    pub fn feature_count(&self) -> usize {
        self.mean.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(PriceError::ConfigurationMismatch(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.is_empty() {
            return Err(PriceError::ConfigurationMismatch(
                "scaler has no features".to_string(),
            ));
        }
        if let Some(index) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(PriceError::ConfigurationMismatch(format!(
                "scaler mean {index} is not finite"
            )));
        }
        if let Some(index) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s < 0.0)
        {
            return Err(PriceError::ConfigurationMismatch(format!(
                "scaler scale {index} must be finite and non-negative"
            )));
        }
        Ok(())
    }

    /// Standardise a single sample
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(PriceError::ConfigurationMismatch(format!(
                "scaler expects {} features, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

/// Feature metadata written next to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    /// Column order used at training time
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl FeatureInfo {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feature_names: names.into_iter().map(Into::into).collect(),
            target: None,
        }
    }
}
