pub mod aggregate;
pub mod assemble;
pub mod catalog;
pub mod core;
pub mod encoding;
pub mod request;
pub mod resolve;
pub mod style;
pub mod wasm_api;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The chart type token is not in the catalog's dispatch table.
    UnsupportedChartType,
    /// A `*_type` parameter is not one of the known data types.
    InvalidDataType,
    /// The aggregate function is not one of the known reductions.
    InvalidAggregate,
    /// The process-wide catalog was installed more than once.
    CatalogInstalled,
    Serialization,
    /// The parameter payload handed to an entry point could not be decoded.
    MalformedParams,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::UnsupportedChartType => write!(f, "unsupported chart type"),
            SpecError::InvalidDataType => write!(f, "invalid data type"),
            SpecError::InvalidAggregate => write!(f, "invalid aggregate function"),
            SpecError::CatalogInstalled => write!(f, "chart catalog already installed"),
            SpecError::Serialization => write!(f, "failed to serialize chart spec"),
            SpecError::MalformedParams => write!(f, "malformed chart parameters"),
        }
    }
}

impl std::error::Error for SpecError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<SpecError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::assemble::*;
    pub use crate::catalog::{Catalog, ChartKind, StyleDefaults};
    pub use crate::core::*;
    pub use crate::request::*;
    pub use crate::resolve::*;
}
