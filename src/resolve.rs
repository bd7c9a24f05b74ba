//! Chart type resolution.

use tracing::debug;

use crate::catalog::{self, Catalog, ChartKind};

/// Resolve a chart type token against `catalog`. Unknown tokens resolve to
/// the catalog's fallback kind; this never fails.
pub fn resolve_with(catalog: &Catalog, token: &str) -> ChartKind {
    catalog.lookup(token).unwrap_or_else(|| {
        let fallback = catalog.fallback();
        debug!(token, fallback = fallback.token, "unknown chart type, using fallback");
        fallback
    })
}

/// [`resolve_with`] against the process-wide catalog.
pub fn resolve(token: &str) -> ChartKind {
    resolve_with(catalog::global(), token)
}
