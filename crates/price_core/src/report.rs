//! Display payloads shown next to a prediction
//!
//! Apart from the first comparison row and the input summary, everything in
//! here is static reference content. The linear model exposes no feature
//! importances; the importance table is editorial text.

use crate::features::DerivedInputs;
use crate::pipeline::PredictionResult;
use serde::Serialize;

/// Average California house price, in $1000s
pub const CA_AVERAGE_PRICE_K: f64 = 350.0;
/// Median California house price, in $1000s
pub const CA_MEDIAN_PRICE_K: f64 = 280.0;

/// Bar colour group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Series {
    Prediction,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub category: &'static str,
    pub price_thousands: f64,
    pub series: Series,
}

/// Your house, the state average and the state median
pub fn comparison_rows(prediction: &PredictionResult) -> [ComparisonRow; 3] {
    [
        ComparisonRow {
            category: "Your House",
            price_thousands: prediction.price_thousands(),
            series: Series::Prediction,
        },
        ComparisonRow {
            category: "CA Average",
            price_thousands: CA_AVERAGE_PRICE_K,
            series: Series::Reference,
        },
        ComparisonRow {
            category: "CA Median",
            price_thousands: CA_MEDIAN_PRICE_K,
            series: Series::Reference,
        },
    ]
}

/// How to draw the comparison rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub colors: [(Series, &'static str); 2],
}

pub const COMPARISON_CHART: ChartSpec = ChartSpec {
    title: "Predicted vs Average House Prices",
    x_label: "Category",
    y_label: "Price (in $1000s)",
    colors: [
        (Series::Prediction, "#1f77b4"),
        (Series::Reference, "#ff7f0e"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::VeryHigh => "Very High",
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportanceRow {
    pub feature: &'static str,
    pub impact: Impact,
    pub rationale: &'static str,
}

pub const IMPORTANCE_ROWS: [ImportanceRow; 5] = [
    ImportanceRow {
        feature: "Median Income",
        impact: Impact::VeryHigh,
        rationale: "Higher income = more expensive houses",
    },
    ImportanceRow {
        feature: "Latitude/Longitude",
        impact: Impact::High,
        rationale: "Location influences price (coastal is costlier)",
    },
    ImportanceRow {
        feature: "House Age",
        impact: Impact::Medium,
        rationale: "Newer houses often cost more",
    },
    ImportanceRow {
        feature: "Rooms",
        impact: Impact::Medium,
        rationale: "More rooms → larger and costlier",
    },
    ImportanceRow {
        feature: "Population Density",
        impact: Impact::Low,
        rationale: "Dense areas may increase demand",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryGroup {
    pub title: &'static str,
    pub lines: Vec<SummaryLine>,
}

/// Echo of the inputs, split into two columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    pub property: SummaryGroup,
    pub location: SummaryGroup,
}

impl InputSummary {
    pub fn new(derived: &DerivedInputs) -> Self {
        let raw = &derived.raw;
        // `{:?}` keeps the trailing ".0" on whole floats (6.0, not 6)
        let property = SummaryGroup {
            title: "Property",
            lines: vec![
                SummaryLine::new("Median Income", format!("${:.0}k", raw.med_inc * 10.0)),
                SummaryLine::new("House Age", format!("{} years", raw.house_age)),
                SummaryLine::new("Avg. Rooms", format!("{:?}", raw.ave_rooms)),
                SummaryLine::new("Avg. Bedrooms", format!("{:?}", raw.ave_bedrms)),
                SummaryLine::new("Population", raw.population.to_string()),
                SummaryLine::new("Avg. Occupancy", format!("{:?}", raw.ave_occup)),
            ],
        };
        let location = SummaryGroup {
            title: "Location & Ratios",
            lines: vec![
                SummaryLine::new("Latitude", format!("{:?}", raw.latitude)),
                SummaryLine::new("Longitude", format!("{:?}", raw.longitude)),
                SummaryLine::new("Rooms per Person", format!("{:.2}", derived.rooms_per_person)),
                SummaryLine::new(
                    "Bedrooms per Room",
                    format!("{:.2}", derived.bedrooms_per_room),
                ),
                SummaryLine::new(
                    "Population Density",
                    format!("{:.2}", derived.population_density),
                ),
            ],
        };
        Self { property, location }
    }
}

/// Static description of the deployed model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCard {
    pub model_type: &'static str,
    pub dataset: &'static str,
    pub feature_count: usize,
    pub feature_note: &'static str,
    pub r2_score: f64,
    pub r2_note: &'static str,
    pub limitations: [&'static str; 3],
}

pub const MODEL_CARD: ModelCard = ModelCard {
    model_type: "Linear Regression",
    dataset: "California Housing (20,000+ entries)",
    feature_count: 11,
    feature_note: "including engineered ones like rooms per person",
    r2_score: 0.60,
    r2_note: "Model explains ~60% of price variation",
    limitations: [
        "Based only on California data",
        "Prices are in units of $100,000 (multiply prediction by 100)",
        "Assumes a linear relationship between features and price",
    ],
};

/// Everything the result panel renders for one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub prediction: PredictionResult,
    pub price_thousands: f64,
    pub display_price: String,
    pub summary: InputSummary,
    pub comparison: [ComparisonRow; 3],
    pub chart: ChartSpec,
    pub importance: [ImportanceRow; 5],
}

impl PredictionReport {
    pub fn new(derived: &DerivedInputs, prediction: PredictionResult) -> Self {
        Self {
            prediction,
            price_thousands: prediction.price_thousands(),
            display_price: prediction.display_price(),
            summary: InputSummary::new(derived),
            comparison: comparison_rows(&prediction),
            chart: COMPARISON_CHART,
            importance: IMPORTANCE_ROWS,
        }
    }
}

/// The two observable panel states
///
/// There is no history: each trigger produces a fresh `Predicted` view and
/// nothing is kept between requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Idle {
        prediction_enabled: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
    Predicted {
        report: PredictionReport,
    },
}

impl DashboardView {
    pub fn awaiting_trigger() -> Self {
        DashboardView::Idle {
            prediction_enabled: true,
            notice: None,
        }
    }

    pub fn disabled(notice: impl Into<String>) -> Self {
        DashboardView::Idle {
            prediction_enabled: false,
            notice: Some(notice.into()),
        }
    }

    pub fn is_predicted(&self) -> bool {
        matches!(self, DashboardView::Predicted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::derive;
    use crate::inputs::RawInputs;

    #[test]
    fn test_comparison_rows_fixed_references() {
        for value in [0.0, 1.5, 3.0, 12.7] {
            let rows = comparison_rows(&PredictionResult { value });
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].category, "Your House");
            assert_eq!(rows[0].price_thousands, value * 100.0);
            assert_eq!(rows[0].series, Series::Prediction);
            assert_eq!(rows[1].price_thousands, 350.0);
            assert_eq!(rows[2].price_thousands, 280.0);
            assert!(rows[1..].iter().all(|r| r.series == Series::Reference));
        }
    }

    #[test]
    fn test_importance_rows_verbatim() {
        assert_eq!(IMPORTANCE_ROWS.len(), 5);
        let impacts: Vec<_> = IMPORTANCE_ROWS.iter().map(|r| r.impact.label()).collect();
        assert_eq!(impacts, vec!["Very High", "High", "Medium", "Medium", "Low"]);
        assert_eq!(IMPORTANCE_ROWS[3].rationale, "More rooms → larger and costlier");
    }

    #[test]
    fn test_impact_serializes_with_spaces() {
        assert_eq!(serde_json::to_string(&Impact::VeryHigh).unwrap(), "\"Very High\"");
        assert_eq!(serde_json::to_string(&Impact::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn test_chart_colors_cover_each_series() {
        let colors = serde_json::to_value(COMPARISON_CHART.colors).unwrap();
        assert_eq!(colors[0], serde_json::json!(["Prediction", "#1f77b4"]));
        assert_eq!(colors[1], serde_json::json!(["Reference", "#ff7f0e"]));
    }

    #[test]
    fn test_summary_for_defaults() {
        let derived = derive(&RawInputs::default()).unwrap();
        let summary = InputSummary::new(&derived);

        let property: Vec<_> = summary
            .property
            .lines
            .iter()
            .map(|l| (l.label, l.value.as_str()))
            .collect();
        assert_eq!(
            property,
            vec![
                ("Median Income", "$50k"),
                ("House Age", "20 years"),
                ("Avg. Rooms", "6.0"),
                ("Avg. Bedrooms", "1.1"),
                ("Population", "3000"),
                ("Avg. Occupancy", "3.0"),
            ]
        );

        let location: Vec<_> = summary
            .location
            .lines
            .iter()
            .map(|l| l.value.as_str())
            .collect();
        assert_eq!(location, vec!["34.0", "-118.0", "2.00", "0.18", "10.00"]);
    }

    #[test]
    fn test_dashboard_view_tagging() {
        let idle = serde_json::to_value(DashboardView::disabled("no model")).unwrap();
        assert_eq!(idle["state"], "idle");
        assert_eq!(idle["prediction_enabled"], false);
        assert_eq!(idle["notice"], "no model");

        let waiting = serde_json::to_value(DashboardView::awaiting_trigger()).unwrap();
        assert!(waiting.get("notice").is_none());
    }

    #[test]
    fn test_model_card_is_static() {
        assert_eq!(MODEL_CARD.feature_count, 11);
        assert_eq!(MODEL_CARD.limitations.len(), 3);
        assert!((MODEL_CARD.r2_score - 0.60).abs() < f64::EPSILON);
    }
}
