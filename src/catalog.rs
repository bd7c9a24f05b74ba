//! Read-only tables shared by every build: chart kinds, known data types and
//! aggregate functions, and style defaults.
//!
//! A process installs its [`Catalog`] once at startup with [`install`]; every
//! later reader goes through [`global`]. Nothing in here is mutated after that.

use std::sync::OnceLock;

use error_stack::Report;
use serde::Serialize;

use crate::SpecError;
use crate::core::{AggregateFn, DataType, HandlerKind, Mark, Size};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// One row of the dispatch table: a request token and what it builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartKind {
    pub token: &'static str,
    pub mark: Mark,
    pub handler: HandlerKind,
}

impl ChartKind {
    const fn new(token: &'static str, mark: Mark, handler: HandlerKind) -> Self {
        Self {
            token,
            mark,
            handler,
        }
    }
}

const CHART_KINDS: &[ChartKind] = &[
    ChartKind::new("bar", Mark::Bar, HandlerKind::Standard),
    ChartKind::new("area", Mark::Area, HandlerKind::Standard),
    ChartKind::new("line", Mark::Line, HandlerKind::Standard),
    ChartKind::new("point", Mark::Point, HandlerKind::Standard),
    ChartKind::new("scatter", Mark::Point, HandlerKind::Standard),
    ChartKind::new("circle", Mark::Circle, HandlerKind::Standard),
    ChartKind::new("boxplot", Mark::Boxplot, HandlerKind::Standard),
    ChartKind::new("heatmap", Mark::Rect, HandlerKind::Standard),
    ChartKind::new("histogram", Mark::Bar, HandlerKind::Histogram),
    ChartKind::new("pie", Mark::Arc, HandlerKind::Pie),
];

/// Used for any token missing from the dispatch table.
pub const FALLBACK_KIND: ChartKind = ChartKind::new("bar", Mark::Bar, HandlerKind::Standard);

/// Appearance applied uniformly to every chart.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDefaults {
    pub stroke_width: u32,
    pub width: Size,
    pub height: Size,
    /// Grid visibility on positional axes.
    pub axis_grid: bool,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            stroke_width: 0,
            width: Size::Container,
            height: Size::Pixels(300),
            axis_grid: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    kinds: Vec<ChartKind>,
    fallback: ChartKind,
    data_types: Vec<DataType>,
    aggregates: Vec<AggregateFn>,
    style: StyleDefaults,
    schema: String,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            kinds: CHART_KINDS.to_vec(),
            fallback: FALLBACK_KIND,
            data_types: DataType::KNOWN.to_vec(),
            aggregates: AggregateFn::KNOWN.to_vec(),
            style: StyleDefaults::default(),
            schema: VEGA_LITE_SCHEMA.to_string(),
        }
    }

    pub fn with_style(mut self, style: StyleDefaults) -> Self {
        self.style = style;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.style.height = Size::Pixels(height);
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Exact table lookup after trimming and ASCII lower-casing the token.
    pub fn lookup(&self, token: &str) -> Option<ChartKind> {
        let token = token.trim().to_ascii_lowercase();
        self.kinds.iter().find(|kind| kind.token == token).copied()
    }

    pub fn fallback(&self) -> ChartKind {
        self.fallback
    }

    pub fn chart_kinds(&self) -> &[ChartKind] {
        &self.kinds
    }

    pub fn data_types(&self) -> &[DataType] {
        &self.data_types
    }

    pub fn aggregates(&self) -> &[AggregateFn] {
        &self.aggregates
    }

    pub fn supports_data_type(&self, data_type: &DataType) -> bool {
        self.data_types.contains(data_type)
    }

    pub fn supports_aggregate(&self, function: &AggregateFn) -> bool {
        self.aggregates.contains(function)
    }

    pub fn style(&self) -> &StyleDefaults {
        &self.style
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

/// Install the process-wide catalog. Fails if one is already in place,
/// including the default one created by an earlier [`global`] call.
pub fn install(catalog: Catalog) -> crate::Result<()> {
    GLOBAL
        .set(catalog)
        .map_err(|_| Report::new(SpecError::CatalogInstalled))
}

/// The process-wide catalog, defaulting to [`Catalog::new`] if none was installed.
pub fn global() -> &'static Catalog {
    GLOBAL.get_or_init(Catalog::new)
}
