//! Chart spec API handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    routing::get,
};
use chartspec::catalog::{self, ChartKind};
use chartspec::prelude::{ChartRequest, ChartSpec, SpecBuilder};
use serde::Serialize;
use tracing::debug;

use crate::AppState;
use crate::error::Result;

/// Build the chart API router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chart-spec", get(chart_spec_query).post(chart_spec_form))
        .route("/options", get(options))
}

/// GET /api/chart-spec - Build a spec from query parameters
async fn chart_spec_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ChartSpec>> {
    build(&state, &params).map(Json)
}

/// POST /api/chart-spec - Build a spec from a submitted form
async fn chart_spec_form(
    State(state): State<Arc<AppState>>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<ChartSpec>> {
    build(&state, &params).map(Json)
}

fn build(state: &AppState, params: &HashMap<String, String>) -> Result<ChartSpec> {
    let catalog = catalog::global();

    let mut request = ChartRequest::from_params(params);
    if let Some(url) = &state.config.data_url {
        request = request.data_url(url.as_str());
    }
    if state.config.strict {
        request.validate(catalog)?;
    }

    let spec = SpecBuilder::new(catalog).build(&request);
    debug!(
        chart_type = request.chart_type(),
        mark = ?spec.mark(),
        "built chart spec"
    );
    Ok(spec)
}

/// Everything a client can put in a chart request
#[derive(Debug, Serialize)]
struct Options {
    chart_types: Vec<ChartKind>,
    fallback: ChartKind,
    data_types: Vec<String>,
    aggregate_functions: Vec<String>,
}

/// GET /api/options - Supported chart types, data types and aggregates
async fn options() -> Json<Options> {
    let catalog = catalog::global();
    Json(Options {
        chart_types: catalog.chart_kinds().to_vec(),
        fallback: catalog.fallback(),
        data_types: catalog
            .data_types()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
        aggregate_functions: catalog
            .aggregates()
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
    })
}
