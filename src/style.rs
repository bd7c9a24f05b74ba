//! Shared appearance: view stroke, axis grid, sizing, and title.

use crate::catalog::StyleDefaults;
use crate::core::{AxisConfig, Config, HandlerKind, Properties, ViewConfig};

/// The `config` block. Pie charts have no positional axes, so they get no
/// `axis` entry at all.
pub fn config(handler: HandlerKind, defaults: &StyleDefaults) -> Config {
    let axis = match handler {
        HandlerKind::Standard | HandlerKind::Histogram => Some(AxisConfig {
            grid: defaults.axis_grid,
        }),
        HandlerKind::Pie => None,
    };

    Config {
        view: ViewConfig {
            stroke_width: defaults.stroke_width,
        },
        axis,
    }
}

/// Sizing plus the title, if one was given.
pub fn properties(title: Option<&str>, defaults: &StyleDefaults) -> Properties {
    Properties {
        width: defaults.width,
        height: defaults.height,
        title: title.map(str::to_string),
    }
}
