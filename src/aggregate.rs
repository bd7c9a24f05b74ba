//! Encodings that reduce the data: binned histograms and pie charts.

use crate::core::{BinSpec, Encoding, EncodingChannel};
use crate::request::ChartRequest;

/// Bin count used when no usable positive step was requested.
pub const DEFAULT_MAX_BINS: u32 = 20;

/// Positive steps bin by step width; anything else lets the renderer pick
/// up to [`DEFAULT_MAX_BINS`] bins.
pub fn resolve_bin(step: f64) -> BinSpec {
    if step > 0.0 {
        BinSpec::Step(step)
    } else {
        BinSpec::MaxBins(DEFAULT_MAX_BINS)
    }
}

/// Binned `x` against an aggregated, field-less `y` titled
/// `"<Function> of Records"`.
pub fn histogram(request: &ChartRequest) -> Encoding {
    let function = request.aggregate_fn();
    let x = request
        .x_field()
        .channel()
        .with_bin(resolve_bin(request.bin_step_value()));
    let y = EncodingChannel::aggregate(function.clone())
        .with_title(format!("{} of Records", function.display_name()));

    Encoding::cartesian(x, y, request.color_field().map(|color| color.channel()))
}

/// Aggregated `theta` over the value field, sliced by an unaggregated `color`.
pub fn pie(request: &ChartRequest) -> Encoding {
    let theta = request
        .value_field()
        .channel()
        .with_aggregate(request.aggregate_fn().clone());

    Encoding::radial(theta, request.slice_field().channel())
}
