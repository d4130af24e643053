//! WebAssembly bindings for calckit-core
//!
//! Enable the "wasm" feature to use these bindings. Every method takes and
//! returns JSON strings so pages can stay framework-agnostic.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::calculators::gst::{DEFAULT_GST_RATE, GST_RATES};
use crate::{Engine, Request, UnitCategory};

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible wrapper around the request evaluator
#[wasm_bindgen]
pub struct WasmCalculator {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Evaluate a JSON request, e.g. `{"calculator": "bmi", "weight": "70", "height": "175"}`.
    /// Returns the serialized calculation outcome.
    #[wasm_bindgen]
    pub fn calculate(&self, request_json: &str) -> String {
        match serde_json::from_str::<Request>(request_json) {
            Ok(request) => serde_json::to_string(&self.engine.evaluate(&request))
                .unwrap_or_else(|_| "{}".to_string()),
            Err(e) => serde_json::to_string(&MalformedJson {
                status: "error",
                kind: "malformed_request",
                message: e.to_string(),
            })
            .unwrap_or_else(|_| "{}".to_string()),
        }
    }

    /// Units of a category (`length`, `weight`, `temperature`, `volume`) as a JSON array
    #[wasm_bindgen]
    pub fn units(&self, category: &str) -> String {
        let Some(category) = UnitCategory::parse(category) else {
            return "[]".to_string();
        };
        let units: Vec<UnitJson> = category
            .units()
            .map(|unit| UnitJson {
                id: unit,
                label: unit.label(),
                short_name: unit.short_name(),
            })
            .collect();
        serde_json::to_string(&units).unwrap_or_else(|_| "[]".to_string())
    }

    /// GST rate presets as a JSON array
    #[wasm_bindgen]
    pub fn gst_rates(&self) -> String {
        let rates: Vec<GstRateJson> = GST_RATES
            .iter()
            .map(|def| GstRateJson {
                rate: def.rate,
                label: def.label,
                is_default: def.rate == DEFAULT_GST_RATE,
            })
            .collect();
        serde_json::to_string(&rates).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct MalformedJson {
    status: &'static str,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct UnitJson {
    id: crate::Unit,
    label: String,
    short_name: &'static str,
}

#[derive(Serialize)]
struct GstRateJson {
    rate: f64,
    label: &'static str,
    is_default: bool,
}
