//! Calculator requests carrying raw field contents

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of all calculators, in the order front ends list them
pub const CALCULATORS: &[&str] = &[
    "percent_of",
    "what_percent",
    "percent_change",
    "profit_loss",
    "discount",
    "add_gst",
    "remove_gst",
    "loan",
    "sip",
    "bmi",
    "convert",
    "date_difference",
    "age",
];

/// Field contents exactly as typed. JSON numbers and `null` are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawInput(String);

impl RawInput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        RawInput(s.to_string())
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        RawInput(s)
    }
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        RawInput(n.to_string())
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct RawInputVisitor;

impl<'de> Visitor<'de> for RawInputVisitor {
    type Value = RawInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawInput, E> {
        Ok(RawInput::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawInput, E> {
        Ok(RawInput(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawInput, E> {
        Ok(RawInput(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawInput, E> {
        Ok(RawInput(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawInput, E> {
        Ok(RawInput::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawInput, E> {
        Ok(RawInput::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<RawInput, E> {
        Ok(RawInput::default())
    }
}

impl<'de> Deserialize<'de> for RawInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawInputVisitor)
    }
}

fn default_gst_rate() -> RawInput {
    RawInput::from(crate::calculators::gst::DEFAULT_GST_RATE)
}

/// One calculator invocation. Missing fields count as blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum Request {
    PercentOf {
        #[serde(default)]
        percent: RawInput,
        #[serde(default)]
        value: RawInput,
    },
    WhatPercent {
        #[serde(default)]
        part: RawInput,
        #[serde(default)]
        whole: RawInput,
    },
    PercentChange {
        #[serde(default)]
        from: RawInput,
        #[serde(default)]
        to: RawInput,
    },
    ProfitLoss {
        #[serde(default)]
        cost_price: RawInput,
        #[serde(default)]
        selling_price: RawInput,
    },
    Discount {
        #[serde(default)]
        original_price: RawInput,
        #[serde(default)]
        discount_percent: RawInput,
        #[serde(default)]
        tax_percent: RawInput,
    },
    AddGst {
        #[serde(default)]
        amount: RawInput,
        #[serde(default = "default_gst_rate")]
        rate: RawInput,
    },
    RemoveGst {
        #[serde(default)]
        amount: RawInput,
        #[serde(default = "default_gst_rate")]
        rate: RawInput,
    },
    Loan {
        #[serde(default)]
        principal: RawInput,
        #[serde(default)]
        annual_rate: RawInput,
        #[serde(default)]
        tenure: RawInput,
        /// `years` (default when blank) or `months`
        #[serde(default)]
        tenure_unit: RawInput,
    },
    Sip {
        #[serde(default)]
        monthly_investment: RawInput,
        #[serde(default)]
        annual_rate: RawInput,
        #[serde(default)]
        years: RawInput,
    },
    Bmi {
        #[serde(default)]
        weight: RawInput,
        #[serde(default)]
        height: RawInput,
        /// `metric` (default when blank) or `imperial`
        #[serde(default)]
        unit_system: RawInput,
    },
    Convert {
        #[serde(default)]
        value: RawInput,
        #[serde(default)]
        from: RawInput,
        #[serde(default)]
        to: RawInput,
    },
    DateDifference {
        #[serde(default)]
        start: RawInput,
        #[serde(default)]
        end: RawInput,
    },
    Age {
        #[serde(default)]
        birth_date: RawInput,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Request {
    /// Calculator name as used in the `calculator` tag
    pub fn name(&self) -> &'static str {
        match self {
            Request::PercentOf { .. } => "percent_of",
            Request::WhatPercent { .. } => "what_percent",
            Request::PercentChange { .. } => "percent_change",
            Request::ProfitLoss { .. } => "profit_loss",
            Request::Discount { .. } => "discount",
            Request::AddGst { .. } => "add_gst",
            Request::RemoveGst { .. } => "remove_gst",
            Request::Loan { .. } => "loan",
            Request::Sip { .. } => "sip",
            Request::Bmi { .. } => "bmi",
            Request::Convert { .. } => "convert",
            Request::DateDifference { .. } => "date_difference",
            Request::Age { .. } => "age",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_strings_and_numbers() {
        let request: Request = serde_json::from_str(
            r#"{"calculator": "percent_of", "percent": "20", "value": 150}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::PercentOf {
                percent: RawInput::from("20"),
                value: RawInput::from("150"),
            }
        );
    }

    #[test]
    fn test_missing_fields_are_blank() {
        let request: Request =
            serde_json::from_str(r#"{"calculator": "loan", "principal": null}"#).unwrap();
        match request {
            Request::Loan {
                principal,
                tenure,
                tenure_unit,
                ..
            } => {
                assert!(principal.is_blank());
                assert!(tenure.is_blank());
                assert!(tenure_unit.is_blank());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_gst_rate_defaults() {
        let request: Request =
            serde_json::from_str(r#"{"calculator": "add_gst", "amount": "100"}"#).unwrap();
        match request {
            Request::AddGst { rate, .. } => assert_eq!(rate.as_str(), "18"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_names_match_tags() {
        let request = Request::DateDifference {
            start: RawInput::default(),
            end: RawInput::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["calculator"], request.name());
        assert!(CALCULATORS.contains(&request.name()));
    }

    #[test]
    fn test_choice_fields_keep_raw_text() {
        let request: Request = serde_json::from_str(
            r#"{"calculator": "bmi", "weight": 154, "height": 69, "unit_system": "Imperial"}"#,
        )
        .unwrap();
        match request {
            Request::Bmi { unit_system, .. } => assert_eq!(unit_system.as_str(), "Imperial"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_calculator() {
        assert!(serde_json::from_str::<Request>(r#"{"calculator": "tip"}"#).is_err());
    }
}
