//! Sample dataset endpoint

use std::sync::Arc;

use axum::{Json, Router, routing::get};

use crate::AppState;
use crate::models::{SampleRow, sample_rows};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/data.json", get(get_data))
}

/// GET /api/data.json - Rows the charts are drawn from
async fn get_data() -> Json<Vec<SampleRow>> {
    Json(sample_rows())
}
