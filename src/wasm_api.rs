//! WASM API exports for JavaScript interop
//!
//! Lets a page build chart specs client-side from the same flat parameters
//! the HTTP endpoint accepts. Only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use std::collections::HashMap;

use error_stack::{Report, ResultExt};
use wasm_bindgen::prelude::*;

use crate::SpecError;
use crate::assemble::build_spec;
use crate::request::ChartRequest;

fn spec_json(params_json: &str) -> crate::Result<String> {
    let params: HashMap<String, String> = serde_json::from_str(params_json)
        .change_context(SpecError::MalformedParams)
        .attach("expected a flat object of string values".to_string())?;

    build_spec(&ChartRequest::from_params(&params)).to_json()
}

/// Build a Vega-Lite spec from a JSON object of chart parameters
///
/// # Arguments
/// * `params_json` - e.g. `{"type": "bar", "x": "category", "xType": "nominal"}`
#[wasm_bindgen]
pub fn chart_spec(params_json: &str) -> Result<String, JsValue> {
    spec_json(params_json)
        .map_err(|report: Report<SpecError>| JsValue::from_str(&format!("{report:?}")))
}
