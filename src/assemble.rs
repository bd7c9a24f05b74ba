//! Spec assembly: resolve the chart kind, let its handler build the
//! encoding, then apply the shared style.
//!
//! ```rust
//! use chartspec::prelude::*;
//!
//! let request = ChartRequest::new("bar")
//!     .x("category", DataType::Nominal)
//!     .y("value", DataType::Quantitative)
//!     .title("Totals");
//! let spec = build_spec(&request);
//! assert_eq!(spec.mark(), Mark::Bar);
//! ```

use crate::aggregate;
use crate::catalog::{self, Catalog};
use crate::core::{ChartSpec, DataSource, Encoding, HandlerKind};
use crate::encoding;
use crate::request::ChartRequest;
use crate::resolve::resolve_with;
use crate::style;

/// Builds specs against a borrowed [`Catalog`]. Holds no other state, so one
/// builder can be shared freely across threads.
#[derive(Clone, Copy, Debug)]
pub struct SpecBuilder<'c> {
    catalog: &'c Catalog,
}

impl<'c> SpecBuilder<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn build(&self, request: &ChartRequest) -> ChartSpec {
        let kind = resolve_with(self.catalog, request.chart_type());
        let encoding = encode(kind.handler, request);
        let defaults = self.catalog.style();

        ChartSpec::new(
            self.catalog.schema().to_string(),
            request.data_url_value().map(|url| DataSource {
                url: url.to_string(),
            }),
            kind.mark,
            encoding,
            style::config(kind.handler, defaults),
            style::properties(request.title_text(), defaults),
        )
    }
}

fn encode(handler: HandlerKind, request: &ChartRequest) -> Encoding {
    match handler {
        HandlerKind::Standard => encoding::standard(request),
        HandlerKind::Histogram => aggregate::histogram(request),
        HandlerKind::Pie => aggregate::pie(request),
    }
}

/// Build a spec with the process-wide catalog.
pub fn build_spec(request: &ChartRequest) -> ChartSpec {
    SpecBuilder::new(catalog::global()).build(request)
}
