//! Measurement units and their conversion factors
//!
//! To add a new unit, add an enum variant and an entry to the UNITS array.
//! Parsing, listing and conversion pick it up automatically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Volume,
}

impl UnitCategory {
    pub fn all() -> [UnitCategory; 4] {
        [
            UnitCategory::Length,
            UnitCategory::Weight,
            UnitCategory::Temperature,
            UnitCategory::Volume,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Temperature => "Temperature",
            UnitCategory::Volume => "Volume",
        }
    }

    /// Units of this category in registry order
    pub fn units(self) -> impl Iterator<Item = Unit> {
        UNITS
            .iter()
            .filter(move |d| d.category == self)
            .map(|d| d.unit)
    }

    /// Initial (from, to) selection: the first two units of the category
    pub fn default_pair(self) -> (Unit, Unit) {
        let mut units = self.units();
        match (units.next(), units.next()) {
            (Some(from), Some(to)) => (from, to),
            _ => unreachable!("every category registers at least two units"),
        }
    }

    /// Parse a category name (case-insensitive)
    pub fn parse(s: &str) -> Option<UnitCategory> {
        UnitCategory::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit metadata - single source of truth for each unit
pub struct UnitDef {
    pub unit: Unit,
    pub category: UnitCategory,
    /// Plural display name (e.g., "Meters")
    pub name: &'static str,
    /// Short symbol (e.g., "km", "°F")
    pub short_name: &'static str,
    /// Multiplier to the category's base unit; `None` for temperature scales
    pub to_base_factor: Option<f64>,
    /// All accepted aliases for parsing (lowercase)
    pub aliases: &'static [&'static str],
}

/// Complete registry of all supported units.
/// The first entry of each category is its base unit.
pub static UNITS: &[UnitDef] = &[
    // Length (base: meter)
    UnitDef {
        unit: Unit::Meter,
        category: UnitCategory::Length,
        name: "Meters",
        short_name: "m",
        to_base_factor: Some(1.0),
        aliases: &["m", "meter", "meters", "metre", "metres"],
    },
    UnitDef {
        unit: Unit::Kilometer,
        category: UnitCategory::Length,
        name: "Kilometers",
        short_name: "km",
        to_base_factor: Some(1000.0),
        aliases: &["km", "kilometer", "kilometers"],
    },
    UnitDef {
        unit: Unit::Mile,
        category: UnitCategory::Length,
        name: "Miles",
        short_name: "mi",
        to_base_factor: Some(1609.34),
        aliases: &["mi", "mile", "miles"],
    },
    UnitDef {
        unit: Unit::Foot,
        category: UnitCategory::Length,
        name: "Feet",
        short_name: "ft",
        to_base_factor: Some(0.3048),
        aliases: &["ft", "foot", "feet"],
    },
    UnitDef {
        unit: Unit::Inch,
        category: UnitCategory::Length,
        name: "Inches",
        short_name: "in",
        to_base_factor: Some(0.0254),
        aliases: &["in", "inch", "inches"],
    },
    UnitDef {
        unit: Unit::Centimeter,
        category: UnitCategory::Length,
        name: "Centimeters",
        short_name: "cm",
        to_base_factor: Some(0.01),
        aliases: &["cm", "centimeter", "centimeters"],
    },
    UnitDef {
        unit: Unit::Millimeter,
        category: UnitCategory::Length,
        name: "Millimeters",
        short_name: "mm",
        to_base_factor: Some(0.001),
        aliases: &["mm", "millimeter", "millimeters"],
    },
    // Weight (base: kilogram)
    UnitDef {
        unit: Unit::Kilogram,
        category: UnitCategory::Weight,
        name: "Kilograms",
        short_name: "kg",
        to_base_factor: Some(1.0),
        aliases: &["kg", "kilogram", "kilograms"],
    },
    UnitDef {
        unit: Unit::Gram,
        category: UnitCategory::Weight,
        name: "Grams",
        short_name: "g",
        to_base_factor: Some(0.001),
        aliases: &["g", "gram", "grams"],
    },
    UnitDef {
        unit: Unit::Pound,
        category: UnitCategory::Weight,
        name: "Pounds",
        short_name: "lb",
        to_base_factor: Some(0.453592),
        aliases: &["lb", "lbs", "pound", "pounds"],
    },
    UnitDef {
        unit: Unit::Ounce,
        category: UnitCategory::Weight,
        name: "Ounces",
        short_name: "oz",
        to_base_factor: Some(0.0283495),
        aliases: &["oz", "ounce", "ounces"],
    },
    UnitDef {
        unit: Unit::Milligram,
        category: UnitCategory::Weight,
        name: "Milligrams",
        short_name: "mg",
        to_base_factor: Some(0.000001),
        aliases: &["mg", "milligram", "milligrams"],
    },
    // Temperature (pivot: celsius, no linear factor)
    UnitDef {
        unit: Unit::Celsius,
        category: UnitCategory::Temperature,
        name: "Celsius",
        short_name: "°C",
        to_base_factor: None,
        aliases: &["c", "celsius", "°c"],
    },
    UnitDef {
        unit: Unit::Fahrenheit,
        category: UnitCategory::Temperature,
        name: "Fahrenheit",
        short_name: "°F",
        to_base_factor: None,
        aliases: &["f", "fahrenheit", "°f"],
    },
    UnitDef {
        unit: Unit::Kelvin,
        category: UnitCategory::Temperature,
        name: "Kelvin",
        short_name: "K",
        to_base_factor: None,
        aliases: &["k", "kelvin"],
    },
    // Volume (base: liter)
    UnitDef {
        unit: Unit::Liter,
        category: UnitCategory::Volume,
        name: "Liters",
        short_name: "L",
        to_base_factor: Some(1.0),
        aliases: &["l", "liter", "liters", "litre", "litres"],
    },
    UnitDef {
        unit: Unit::Milliliter,
        category: UnitCategory::Volume,
        name: "Milliliters",
        short_name: "mL",
        to_base_factor: Some(0.001),
        aliases: &["ml", "milliliter", "milliliters"],
    },
    UnitDef {
        unit: Unit::Gallon,
        category: UnitCategory::Volume,
        name: "Gallons",
        short_name: "gal",
        to_base_factor: Some(3.78541),
        aliases: &["gal", "gallon", "gallons"],
    },
    UnitDef {
        unit: Unit::Cup,
        category: UnitCategory::Volume,
        name: "Cups",
        short_name: "cup",
        to_base_factor: Some(0.236588),
        aliases: &["cup", "cups"],
    },
];

/// Supported units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    // Length
    Meter,
    Kilometer,
    Mile,
    Foot,
    Inch,
    Centimeter,
    Millimeter,
    // Weight
    Kilogram,
    Gram,
    Pound,
    Ounce,
    Milligram,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
    // Volume
    Liter,
    Milliliter,
    Gallon,
    Cup,
}

impl Unit {
    /// Get the unit definition
    pub fn def(&self) -> &'static UnitDef {
        UNITS
            .iter()
            .find(|d| d.unit == *self)
            .expect("All units must have definitions")
    }

    pub fn category(&self) -> UnitCategory {
        self.def().category
    }

    /// Linear factor to the category's base unit (`None` for temperatures)
    pub fn to_base_factor(&self) -> Option<f64> {
        self.def().to_base_factor
    }

    pub fn short_name(&self) -> &'static str {
        self.def().short_name
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Selector label, e.g. "Kilometers (km)"
    pub fn label(&self) -> String {
        let def = self.def();
        let singular = def.name.to_lowercase();
        if singular.trim_end_matches('s') == def.short_name.to_lowercase() {
            def.name.to_string()
        } else {
            format!("{} ({})", def.name, def.short_name)
        }
    }

    /// Parse unit from a symbol, name or alias
    pub fn parse(s: &str) -> Option<Unit> {
        let s = s.trim();
        let lower = s.to_lowercase();
        UNITS
            .iter()
            .find(|d| d.short_name == s || d.aliases.iter().any(|a| *a == lower))
            .map(|d| d.unit)
    }

    /// Iterator over all units
    pub fn all() -> impl Iterator<Item = Unit> {
        UNITS.iter().map(|d| d.unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s).ok_or_else(|| format!("Unknown unit: {s}"))
    }
}
