//! Body Mass Index
//!
//! Metric: weight in kg, height in cm. Imperial: weight in lb, height in inches.
//! Category thresholds are the same for both since BMI itself is unit-free.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, ensure_positive, CalcError, Result};
use crate::format::{format_fixed, format_number};

/// Imperial BMI scale constant (lb/in² → kg/m²)
const IMPERIAL_FACTOR: f64 = 703.0;

/// Healthy BMI band used for the weight range
const HEALTHY_MIN_BMI: f64 = 18.5;
const HEALTHY_MAX_BMI: f64 = 24.9;

const UNREALISTIC: &str = "Unable to calculate BMI. Please check your weight and height.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn parse(s: &str) -> Option<UnitSystem> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lbs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Category metadata - single source of truth for each BMI band
pub struct BmiCategoryDef {
    pub category: BmiCategory,
    /// Inclusive lower BMI bound of the band
    pub lower_bound: f64,
    pub label: &'static str,
    pub risk: RiskLevel,
    pub risk_description: &'static str,
    pub advice: &'static str,
}

/// Bands in ascending order of `lower_bound`
pub static BMI_CATEGORIES: &[BmiCategoryDef] = &[
    BmiCategoryDef {
        category: BmiCategory::Underweight,
        lower_bound: 0.0,
        label: "Underweight",
        risk: RiskLevel::Medium,
        risk_description: "Underweight individuals may have a higher risk of nutrient deficiencies and weaker immune systems.",
        advice: "Being underweight may indicate nutritional deficiencies or other health issues. Consider consulting with a healthcare provider.",
    },
    BmiCategoryDef {
        category: BmiCategory::Normal,
        lower_bound: 18.5,
        label: "Normal weight",
        risk: RiskLevel::Low,
        risk_description: "A normal BMI indicates a lower risk for heart disease and other health issues.",
        advice: "Your weight is within the healthy range for your height. Maintain a balanced diet and regular exercise.",
    },
    BmiCategoryDef {
        category: BmiCategory::Overweight,
        lower_bound: 25.0,
        label: "Overweight",
        risk: RiskLevel::Medium,
        risk_description: "Being overweight can increase the risk of chronic diseases such as heart disease and diabetes.",
        advice: "Being overweight may increase the risk of heart disease, diabetes, and other health conditions. Consider a healthy diet and more physical activity.",
    },
    BmiCategoryDef {
        category: BmiCategory::Obese,
        lower_bound: 30.0,
        label: "Obese",
        risk: RiskLevel::High,
        risk_description: "Obesity is associated with a high risk of serious conditions like heart disease, stroke, and hypertension.",
        advice: "Obesity is associated with higher risks of cardiovascular disease, diabetes, and other health issues. It's recommended to consult with a healthcare provider.",
    },
];

impl BmiCategory {
    pub fn def(&self) -> &'static BmiCategoryDef {
        BMI_CATEGORIES
            .iter()
            .find(|d| d.category == *self)
            .expect("All BMI categories must have definitions")
    }

    /// Band containing `bmi`; lower bounds are inclusive
    pub fn classify(bmi: f64) -> BmiCategory {
        BMI_CATEGORIES
            .iter()
            .rev()
            .find(|d| bmi >= d.lower_bound)
            .map_or(BmiCategory::Underweight, |d| d.category)
    }

    pub fn label(&self) -> &'static str {
        self.def().label
    }

    pub fn risk(&self) -> RiskLevel {
        self.def().risk
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weights giving a BMI in the healthy band, in the input unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub risk: RiskLevel,
    pub healthy_weight_range: WeightRange,
    pub unit_system: UnitSystem,
}

impl fmt::Display for BmiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit_system.weight_unit();
        write!(
            f,
            "BMI {} ({}), healthy weight {}-{} {}",
            format_number(self.bmi, 1),
            self.category,
            format_fixed(self.healthy_weight_range.min, 1),
            format_fixed(self.healthy_weight_range.max, 1),
            unit
        )
    }
}

pub fn compute_bmi(weight: f64, height: f64, unit_system: UnitSystem) -> Result<BmiResult> {
    let weight = ensure_positive(
        weight,
        "Weight",
        "Please enter a valid weight greater than 0",
    )?;
    let height = ensure_positive(
        height,
        "Height",
        "Please enter a valid height greater than 0",
    )?;

    let (bmi, healthy_weight_range) = match unit_system {
        UnitSystem::Metric => {
            let meters = height / 100.0;
            let squared = meters * meters;
            (
                weight / squared,
                WeightRange {
                    min: HEALTHY_MIN_BMI * squared,
                    max: HEALTHY_MAX_BMI * squared,
                },
            )
        }
        UnitSystem::Imperial => {
            let squared = height * height;
            (
                weight / squared * IMPERIAL_FACTOR,
                WeightRange {
                    min: HEALTHY_MIN_BMI * squared / IMPERIAL_FACTOR,
                    max: HEALTHY_MAX_BMI * squared / IMPERIAL_FACTOR,
                },
            )
        }
    };

    // Extreme heights can underflow to a zero BMI or overflow the range
    let bmi = ensure_finite(bmi, UNREALISTIC)?;
    if bmi <= 0.0 {
        return Err(CalcError::CalculationFailed(UNREALISTIC));
    }
    ensure_finite(healthy_weight_range.min, UNREALISTIC)?;
    ensure_finite(healthy_weight_range.max, UNREALISTIC)?;

    let category = BmiCategory::classify(bmi);
    Ok(BmiResult {
        bmi,
        category,
        risk: category.risk(),
        healthy_weight_range,
        unit_system,
    })
}
